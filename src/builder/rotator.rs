//! Builder for rotators and their auto-advance.

use crate::builder::error::BuildError;
use crate::config::TimingSettings;
use crate::effects::AutoRotator;
use crate::rotator::{Cadence, ResumePolicy, Rotator};
use std::time::Duration;

/// Builder for a [`Rotator`] and its [`Cadence`].
///
/// ```rust
/// use choreo::builder::RotatorBuilder;
/// use std::time::Duration;
///
/// let (hero, cadence) = RotatorBuilder::new()
///     .items(vec!["hero1.jpg", "hero2.jpg", "hero3.jpg"])
///     .interval(Duration::from_secs(5))
///     .start_at(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(*hero.current(), "hero2.jpg");
/// assert_eq!(cadence.interval(), Duration::from_secs(5));
/// ```
pub struct RotatorBuilder<T> {
    items: Option<Vec<T>>,
    interval: Option<Duration>,
    resume: ResumePolicy,
    start_at: usize,
}

impl<T> RotatorBuilder<T> {
    pub fn new() -> Self {
        Self {
            items: None,
            interval: None,
            resume: ResumePolicy::Continuous,
            start_at: 0,
        }
    }

    /// Start from configured timings.
    ///
    /// `interval` picks which carousel this is, e.g.
    /// `timing.hero_interval()`; the resume policy comes from the
    /// configured manual cooldown.
    pub fn from_timing(timing: &TimingSettings, interval: Duration) -> Self {
        Self::new().interval(interval).resume(timing.resume_policy())
    }

    /// Set the items to rotate through (required).
    pub fn items(mut self, items: Vec<T>) -> Self {
        self.items = Some(items);
        self
    }

    /// Set the auto-advance interval (required).
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn resume(mut self, policy: ResumePolicy) -> Self {
        self.resume = policy;
        self
    }

    pub fn start_at(mut self, index: usize) -> Self {
        self.start_at = index;
        self
    }

    /// Build the pure rotator and its cadence.
    pub fn build(self) -> Result<(Rotator<T>, Cadence), BuildError> {
        let items = self.items.ok_or(BuildError::MissingItems)?;
        let interval = self.interval.ok_or(BuildError::MissingInterval)?;

        let mut rotator = Rotator::new(items)?;
        rotator.go_to(self.start_at)?;
        let cadence = Cadence::new(interval)?.with_policy(self.resume);
        Ok((rotator, cadence))
    }
}

impl<T: Send + 'static> RotatorBuilder<T> {
    /// Build and spawn the auto-advance timer. Needs a tokio runtime.
    pub fn start(self) -> Result<AutoRotator<Rotator<T>>, BuildError> {
        let (rotator, cadence) = self.build()?;
        Ok(AutoRotator::start(rotator, cadence))
    }
}

impl<T> Default for RotatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::RotatorError;

    #[test]
    fn missing_items_is_reported() {
        let result = RotatorBuilder::<u8>::new()
            .interval(Duration::from_secs(1))
            .build();
        assert!(matches!(result, Err(BuildError::MissingItems)));
    }

    #[test]
    fn missing_interval_is_reported() {
        let result = RotatorBuilder::new().items(vec![1]).build();
        assert!(matches!(result, Err(BuildError::MissingInterval)));
    }

    #[test]
    fn rotator_errors_pass_through() {
        let result = RotatorBuilder::new()
            .items(vec![1, 2])
            .interval(Duration::from_secs(1))
            .start_at(2)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Rotator(RotatorError::InvalidIndex { index: 2, len: 2 }))
        ));

        let result = RotatorBuilder::new()
            .items(vec![1, 2])
            .interval(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(BuildError::Rotator(RotatorError::ZeroInterval))));
    }

    #[test]
    fn from_timing_takes_interval_and_cooldown() {
        let timing = TimingSettings {
            manual_cooldown_ms: 6000,
            ..TimingSettings::default()
        };
        let (hero, cadence) = RotatorBuilder::from_timing(&timing, timing.branch_interval())
            .items(vec!["cv1", "cv2"])
            .build()
            .unwrap();

        assert_eq!(hero.current_index(), 0);
        assert_eq!(cadence.interval(), Duration::from_millis(4000));
        assert_eq!(
            cadence.policy(),
            ResumePolicy::Cooldown(Duration::from_millis(6000))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn start_spawns_timer() {
        let hero = RotatorBuilder::new()
            .items(vec!['a', 'b'])
            .interval(Duration::from_secs(4))
            .start()
            .unwrap();

        tokio::time::sleep(Duration::from_millis(4001)).await;
        assert_eq!(hero.current_index(), 1);
    }
}
