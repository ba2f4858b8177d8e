//! Form submission: schemas, answers, validation and the pure status
//! machine.
//!
//! [`FormState`] decides what a submission may do; the asynchronous part
//! (sending the notification, the reset timer) is
//! [`crate::effects::FormSubmitter`].
//!
//! # Example
//!
//! ```rust
//! use choreo::form::{Begin, FormSchema, FormState, FormStatus};
//!
//! let mut form = FormState::new(FormSchema::rental().with_mandatory(["phone"]).unwrap());
//! form.set_field("phone", "9876543210").unwrap();
//!
//! let Begin::Started { .. } = form.begin_submit().unwrap() else {
//!     panic!("submission should start");
//! };
//! assert_eq!(form.status(), FormStatus::Submitting);
//!
//! form.finish(Ok(()));
//! assert_eq!(form.status(), FormStatus::Success);
//!
//! form.reset_after_success();
//! assert_eq!(form.status(), FormStatus::Idle);
//! assert_eq!(form.fields().get("phone"), Some(""));
//! ```

mod error;
mod fields;
mod schema;
mod status;
pub mod template;
pub mod validation;

pub use error::FormError;
pub use fields::FormFields;
pub use schema::{FieldSpec, FormKind, FormSchema};
pub use status::FormStatus;
pub use template::template_params;
pub use validation::{validate, MissingField};

use crate::core::{Guard, State, StatusChange, StatusLog};
use crate::notify::DeliveryError;
use chrono::Utc;
use tracing::{debug, warn};

/// Result of [`FormState::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Begin {
    /// Now submitting. `fields` is the snapshot to send.
    Started {
        fields: FormFields,
        previous: FormStatus,
        attempt: usize,
    },
    /// Nothing happened; the form was in `status`.
    Ignored(FormStatus),
}

/// Status, answers and history of one form.
#[derive(Debug)]
pub struct FormState {
    schema: FormSchema,
    fields: FormFields,
    status: FormStatus,
    last_error: Option<FormError>,
    log: StatusLog<FormStatus>,
    can_submit: Guard<FormStatus>,
    attempts: usize,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            fields: FormFields::from_schema(&schema),
            schema,
            status: FormStatus::Idle,
            last_error: None,
            log: StatusLog::new(),
            can_submit: Guard::new(FormStatus::accepts_submit),
            attempts: 0,
        }
    }

    /// Start with answers carried over from navigation.
    pub fn with_prefill(mut self, prefill: &FormFields) -> Self {
        self.fields.merge_from(prefill);
        self
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind()
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    pub fn history(&self) -> &StatusLog<FormStatus> {
        &self.log
    }

    /// Submissions started so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Update one answer. Allowed in every status.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.fields.set(name, value)
    }

    /// Try to start a submission.
    ///
    /// Ignored while submitting or showing success. Validation failures leave
    /// the status where it was.
    pub fn begin_submit(&mut self) -> Result<Begin, FormError> {
        if !self.can_submit.check(&self.status) {
            warn!(kind = %self.kind(), status = self.status.name(), "Submission ignored");
            return Ok(Begin::Ignored(self.status));
        }

        if let Err(err) = validation::check(&self.schema, &self.fields) {
            debug!(kind = %self.kind(), missing = ?err.missing_names(), "Submission failed validation");
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let previous = self.status;
        self.attempts += 1;
        self.transition(FormStatus::Submitting);
        Ok(Begin::Started {
            fields: self.fields.clone(),
            previous,
            attempt: self.attempts,
        })
    }

    /// Record the outcome of the notification. Ignored unless submitting.
    pub fn finish(&mut self, outcome: Result<(), DeliveryError>) -> FormStatus {
        if self.status != FormStatus::Submitting {
            return self.status;
        }
        match outcome {
            Ok(()) => {
                self.last_error = None;
                self.transition(FormStatus::Success);
            }
            Err(err) => {
                warn!(kind = %self.kind(), error = %err, "Submission failed");
                self.last_error = Some(FormError::Delivery(err));
                self.transition(FormStatus::Error);
            }
        }
        self.status
    }

    /// Clear the answers and return to `Idle`. Only acts on `Success`.
    pub fn reset_after_success(&mut self) -> bool {
        if self.status != FormStatus::Success {
            return false;
        }
        self.fields.reset_to(&self.schema);
        self.transition(FormStatus::Idle);
        true
    }

    /// Undo a submission whose notification will never report back.
    pub fn abandon(&mut self, previous: FormStatus) {
        if self.status == FormStatus::Submitting {
            debug!(kind = %self.kind(), "Submission abandoned");
            self.transition(previous);
        }
    }

    fn transition(&mut self, to: FormStatus) {
        let from = self.status;
        debug!(kind = %self.kind(), from = from.name(), to = to.name(), "Form status changed");
        self.log.record(StatusChange {
            from,
            to,
            at: Utc::now(),
            attempt: self.attempts,
        });
        self.status = to;
    }
}
