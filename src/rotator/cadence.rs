//! Auto-advance bookkeeping for a rotator.
//!
//! The timer itself belongs to the shell; `Cadence` only answers "should
//! this tick move the carousel?" given the current instant.

use super::RotatorError;
use std::time::Duration;
use tokio::time::Instant;

/// What manual navigation does to auto-advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumePolicy {
    /// Manual moves do not touch the timer.
    #[default]
    Continuous,
    /// Manual moves suppress auto-advance until the cooldown has elapsed.
    Cooldown(Duration),
}

#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    policy: ResumePolicy,
    held: bool,
    cooldown_until: Option<Instant>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Result<Self, RotatorError> {
        if interval.is_zero() {
            return Err(RotatorError::ZeroInterval);
        }
        Ok(Self {
            interval,
            policy: ResumePolicy::Continuous,
            held: false,
            cooldown_until: None,
        })
    }

    pub fn with_policy(mut self, policy: ResumePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn policy(&self) -> ResumePolicy {
        self.policy
    }

    /// Stop auto-advance until [`release`](Self::release).
    pub fn hold(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Record a manual move made at `now`.
    pub fn note_manual(&mut self, now: Instant) {
        if let ResumePolicy::Cooldown(cooldown) = self.policy {
            self.cooldown_until = Some(now + cooldown);
        }
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        self.held || self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Called on every timer tick. Clears an expired cooldown.
    pub fn should_advance(&mut self, now: Instant) -> bool {
        if self.cooldown_until.is_some_and(|until| now >= until) {
            self.cooldown_until = None;
        }
        !self.is_paused(now)
    }
}
