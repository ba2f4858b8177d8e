//! Build errors for form submitter and rotator builders.

use crate::form::FormError;
use crate::rotator::RotatorError;
use thiserror::Error;

/// Errors that can occur when building submitters and rotators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Notifier not specified. Call .notifier(n) before .build()")]
    MissingNotifier,

    #[error("Template routes not specified. Call .routes(r) before .build()")]
    MissingRoutes,

    #[error("Rotator items not specified. Call .items(list) before .build()")]
    MissingItems,

    #[error("Auto-advance interval not specified. Call .interval(d)")]
    MissingInterval,

    #[error("Prefill is for a '{prefill}' form but the schema is '{schema}'")]
    PrefillMismatch { prefill: String, schema: String },

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Rotator(#[from] RotatorError),
}
