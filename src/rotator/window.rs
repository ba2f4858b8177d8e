//! Multi-item slides for carousels that show several cards at once.
//!
//! The host reports the viewport [`Breakpoint`] on every render; the
//! rotator never reads the window size itself.

use super::Rotator;
use serde::{Deserialize, Serialize};

/// Viewport width class supplied by the hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
}

impl Breakpoint {
    pub const MEDIUM_MIN_PX: u32 = 768;
    pub const WIDE_MIN_PX: u32 = 1024;

    pub fn from_width(px: u32) -> Self {
        if px < Self::MEDIUM_MIN_PX {
            Self::Compact
        } else if px < Self::WIDE_MIN_PX {
            Self::Medium
        } else {
            Self::Wide
        }
    }
}

/// Cards per slide at each breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideLayout {
    pub compact: usize,
    pub medium: usize,
    pub wide: usize,
}

impl Default for SlideLayout {
    fn default() -> Self {
        Self {
            compact: 1,
            medium: 2,
            wide: 3,
        }
    }
}

impl SlideLayout {
    /// Same count at every breakpoint.
    pub fn fixed(per_slide: usize) -> Self {
        Self {
            compact: per_slide,
            medium: per_slide,
            wide: per_slide,
        }
    }

    /// Never less than one.
    pub fn per_slide(&self, breakpoint: Breakpoint) -> usize {
        let n = match breakpoint {
            Breakpoint::Compact => self.compact,
            Breakpoint::Medium => self.medium,
            Breakpoint::Wide => self.wide,
        };
        n.max(1)
    }
}

impl<T> Rotator<T> {
    /// The `per_slide` items starting at the current one, wrapping past the
    /// end so the strip loops seamlessly.
    ///
    /// ```rust
    /// use choreo::rotator::Rotator;
    ///
    /// let mut reviews = Rotator::new(vec![1, 2, 3, 4]).unwrap();
    /// reviews.go_to(3).unwrap();
    /// assert_eq!(reviews.window(3), vec![&4, &1, &2]);
    /// ```
    pub fn window(&self, per_slide: usize) -> Vec<&T> {
        let len = self.len();
        (0..per_slide.max(1))
            .map(|k| &self.items()[(self.current_index() + k) % len])
            .collect()
    }

    /// Horizontal translate of the card track, in percent of the viewport.
    pub fn track_offset_percent(&self, per_slide: usize) -> f32 {
        self.current_index() as f32 * (100.0 / per_slide.max(1) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_split_on_widths() {
        assert_eq!(Breakpoint::from_width(375), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(767), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(768), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(1023), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(1440), Breakpoint::Wide);
    }

    #[test]
    fn layout_picks_count_per_breakpoint() {
        let layout = SlideLayout::default();
        assert_eq!(layout.per_slide(Breakpoint::Compact), 1);
        assert_eq!(layout.per_slide(Breakpoint::Medium), 2);
        assert_eq!(layout.per_slide(Breakpoint::Wide), 3);
        assert_eq!(SlideLayout::fixed(0).per_slide(Breakpoint::Wide), 1);
    }

    #[test]
    fn window_wraps_around_the_end() {
        let mut rotator = Rotator::new(vec!['a', 'b', 'c', 'd', 'e', 'f']).unwrap();
        rotator.go_to(5).unwrap();
        assert_eq!(rotator.window(3), vec![&'f', &'a', &'b']);
    }

    #[test]
    fn window_larger_than_list_repeats_items() {
        let rotator = Rotator::new(vec![1, 2]).unwrap();
        assert_eq!(rotator.window(3), vec![&1, &2, &1]);
    }

    #[test]
    fn track_offset_is_a_third_per_step_for_three_cards() {
        let mut rotator = Rotator::new(vec![0; 6]).unwrap();
        rotator.go_to(2).unwrap();
        let offset = rotator.track_offset_percent(3);
        assert!((offset - 66.666_67).abs() < 0.001);
    }
}
