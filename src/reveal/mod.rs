//! Reveal-on-view: a boolean that turns on once an element scrolls into
//! view.
//!
//! [`RevealOnView`] is pure; it is fed visibility samples and decides what
//! the view should show. Wiring it to a real visibility collaborator lives in
//! [`observer`].

pub mod observer;

pub use observer::{
    AttachedReveal, ElementId, ObservationId, Observation, ObserveOptions, VisibilitySink,
    VisibilitySource,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevealError {
    #[error("Visibility threshold {0} must be between 0 and 1")]
    InvalidThreshold(f32),
}

/// Whether the output latches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Stays visible forever after the first qualifying sample.
    #[default]
    Once,
    /// Follows every sample.
    Repeating,
}

/// One report from the visibility collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub intersecting: bool,
    /// Fraction of the element inside the viewport, `0.0..=1.0`.
    pub ratio: f32,
}

impl Visibility {
    pub fn visible(ratio: f32) -> Self {
        Self {
            intersecting: true,
            ratio,
        }
    }

    pub fn hidden() -> Self {
        Self {
            intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Visibility latch for one element.
///
/// ```rust
/// use choreo::reveal::{RevealOnView, Visibility};
///
/// let mut heading = RevealOnView::once(0.3).unwrap();
/// heading.mount();
///
/// assert!(!heading.observe(Visibility::visible(0.1)));
/// assert!(heading.observe(Visibility::visible(0.5)));
/// heading.observe(Visibility::hidden());
/// assert!(heading.is_visible());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOnView {
    threshold: f32,
    policy: RevealPolicy,
    mounted: bool,
    visible: bool,
    triggered: bool,
}

impl RevealOnView {
    /// Unmounted reveal. `threshold` must lie within `0.0..=1.0`.
    pub fn new(threshold: f32, policy: RevealPolicy) -> Result<Self, RevealError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RevealError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            policy,
            mounted: false,
            visible: false,
            triggered: false,
        })
    }

    /// Trigger-once reveal for a threshold known to be in range.
    pub(crate) const fn latched(threshold: f32) -> Self {
        Self {
            threshold,
            policy: RevealPolicy::Once,
            mounted: false,
            visible: false,
            triggered: false,
        }
    }

    /// Reveal that stays visible after the first qualifying sample.
    pub fn once(threshold: f32) -> Result<Self, RevealError> {
        Self::new(threshold, RevealPolicy::Once)
    }

    /// Reveal that follows every sample.
    pub fn repeating(threshold: f32) -> Result<Self, RevealError> {
        Self::new(threshold, RevealPolicy::Repeating)
    }

    /// Visible fraction a sample needs to qualify.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether the output latches or follows samples.
    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    /// Whether samples are currently accepted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start accepting samples.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// After this, late samples are dropped. The latched output is kept.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Feed one sample. Returns `true` when [`is_visible`](Self::is_visible)
    /// changed.
    pub fn observe(&mut self, sample: Visibility) -> bool {
        if !self.mounted {
            trace!(ratio = sample.ratio, "Dropped visibility sample while unmounted");
            return false;
        }

        let qualifies = sample.intersecting && sample.ratio >= self.threshold;
        let next = match self.policy {
            RevealPolicy::Once => self.visible || qualifies,
            RevealPolicy::Repeating => qualifies,
        };
        if qualifies {
            self.triggered = true;
        }

        let changed = next != self.visible;
        self.visible = next;
        changed
    }

    /// Current output.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether any sample has ever qualified.
    pub fn has_triggered(&self) -> bool {
        self.triggered
    }
}
