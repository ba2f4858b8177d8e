//! The imperative shell: timer tasks and the outbound notification.
//!
//! Everything here owns a tokio task or an observation and releases it on
//! drop. The decisions themselves are made by the pure types in
//! [`crate::rotator`], [`crate::counter`] and [`crate::form`].
//!
//! Delivery follows stillwater conventions: [`deliver`] returns
//! `impl Effect` and is run against a [`DeliveryEnv`] that carries the
//! notifier, so tests swap the collaborator without touching the form.

mod auto_rotator;
mod counter_task;
mod delivery;
mod submitter;
mod timer;

pub use auto_rotator::AutoRotator;
pub use counter_task::CounterAnimation;
pub use delivery::{deliver, DeliveryEnv};
pub use submitter::{FormSubmitter, SubmitOutcome, DEFAULT_RESET_AFTER};
pub use timer::TaskGuard;
