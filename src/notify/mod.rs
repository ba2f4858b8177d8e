//! The notification collaborator: whatever actually sends a submitted form
//! somewhere a human will read it.

mod emailjs;

pub use emailjs::{EmailJsNotifier, DEFAULT_ENDPOINT};

use crate::form::FormKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// One message to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Routing identifier selecting the message template.
    pub template_id: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The collaborator answered, but not with success.
    #[error("Notification was not accepted")]
    Rejected,

    #[error("Notification service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not reach notification service: {0}")]
    Transport(String),

    #[error("Notification timed out after {0:?}")]
    TimedOut(Duration),
}

/// Sends notifications.
///
/// `Ok(false)` means the collaborator declined without an error; callers
/// treat it like any other failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, request: &NotificationRequest) -> Result<bool, DeliveryError>;
}

/// Template identifier per form kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRoutes {
    pub trial: String,
    pub rental: String,
}

impl TemplateRoutes {
    pub fn new(trial: impl Into<String>, rental: impl Into<String>) -> Self {
        Self {
            trial: trial.into(),
            rental: rental.into(),
        }
    }

    /// Join forms go out through the trial template.
    pub fn template_for(&self, kind: FormKind) -> &str {
        match kind {
            FormKind::Trial | FormKind::Join => &self.trial,
            FormKind::Rental => &self.rental,
        }
    }
}
