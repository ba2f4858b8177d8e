//! Rotators: an index into a fixed, non-empty list that wraps at both ends.
//!
//! A [`Rotator`] backs every carousel on the site: the hero slideshow, the
//! testimonial strip, the branch photo carousel. Auto-advance bookkeeping
//! lives in [`Cadence`], responsive slide windows in [`window`], and
//! lock-step rotation of several carousels in [`RotatorGroup`]. The timer
//! that actually drives them is in [`crate::effects::AutoRotator`].
//!
//! # Example
//!
//! ```rust
//! use choreo::rotator::{Direction, Rotator};
//!
//! let mut hero = Rotator::new(vec!["A", "B", "C"]).unwrap();
//!
//! hero.next();
//! assert_eq!(*hero.current(), "B");
//!
//! hero.go_to(0).unwrap();
//! hero.previous();
//! assert_eq!(*hero.current(), "C");
//! assert_eq!(hero.direction(), Direction::Backward);
//! ```

mod cadence;
mod group;
pub mod window;

pub use cadence::{Cadence, ResumePolicy};
pub use group::RotatorGroup;
pub use window::{Breakpoint, SlideLayout};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by rotators and their configuration.
///
/// `InvalidIndex` and `UnknownMember` indicate a caller bug (a dot
/// indicator wired to the wrong carousel); they are reported, never
/// silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotatorError {
    #[error("Rotator needs at least one item")]
    Empty,

    #[error("Index {index} is out of range for {len} items")]
    InvalidIndex { index: usize, len: usize },

    #[error("Auto-advance interval must be greater than zero")]
    ZeroInterval,

    #[error("No rotator named '{0}' in this group")]
    UnknownMember(String),
}

/// Which way the last move went. Only used to pick a slide-in animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Position of a rotator as published to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub index: usize,
    pub direction: Direction,
}

/// Something a single timer can advance.
///
/// Implemented by [`Rotator`] and [`RotatorGroup`] so the same driver serves
/// a lone carousel and a grid of per-branch thumbnails.
pub trait Rotating: Send + 'static {
    /// What the view needs to render after a move.
    type Snapshot: Clone + PartialEq + Send + Sync + 'static;

    /// One automatic step.
    fn advance(&mut self);

    fn snapshot(&self) -> Self::Snapshot;
}

/// Index into a fixed, non-empty ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotator<T> {
    items: Vec<T>,
    current: usize,
    direction: Direction,
}

impl<T> Rotator<T> {
    /// Rotator positioned on the first item.
    pub fn new(items: Vec<T>) -> Result<Self, RotatorError> {
        if items.is_empty() {
            return Err(RotatorError::Empty);
        }
        Ok(Self {
            items,
            current: 0,
            direction: Direction::Forward,
        })
    }

    /// Number of items in the rotation.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; a rotator cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Index of the item on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The item on screen.
    pub fn current(&self) -> &T {
        &self.items[self.current]
    }

    /// Direction of the last move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Position and direction, as published to views.
    pub fn frame(&self) -> Frame {
        Frame {
            index: self.current,
            direction: self.direction,
        }
    }

    /// Index the next forward move will land on. Views preload it for the
    /// cross-fade.
    pub fn upcoming_index(&self) -> usize {
        (self.current + 1) % self.items.len()
    }

    /// Move forward one item, wrapping to the start. Returns the new index.
    pub fn next(&mut self) -> usize {
        self.direction = Direction::Forward;
        self.current = (self.current + 1) % self.items.len();
        self.current
    }

    /// Move back one item, wrapping to the end. Returns the new index.
    pub fn previous(&mut self) -> usize {
        let len = self.items.len();
        self.direction = Direction::Backward;
        self.current = (self.current + len - 1) % len;
        self.current
    }

    /// Jump straight to `index`.
    ///
    /// Jumping to the current index changes nothing, direction included.
    pub fn go_to(&mut self, index: usize) -> Result<usize, RotatorError> {
        let len = self.items.len();
        if index >= len {
            return Err(RotatorError::InvalidIndex { index, len });
        }
        if index != self.current {
            self.direction = if index > self.current {
                Direction::Forward
            } else {
                Direction::Backward
            };
            self.current = index;
        }
        Ok(self.current)
    }

    /// Back to the first item, as on a fresh mount.
    pub fn reset(&mut self) {
        self.current = 0;
        self.direction = Direction::Forward;
    }

    /// Give back the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Send + 'static> Rotating for Rotator<T> {
    type Snapshot = Frame;

    fn advance(&mut self) {
        self.next();
    }

    fn snapshot(&self) -> Frame {
        self.frame()
    }
}
