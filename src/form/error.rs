use super::{FormKind, MissingField};
use crate::notify::DeliveryError;
use thiserror::Error;

/// Errors raised by form handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Mandatory fields were blank. Every missing field is listed, in schema
    /// order.
    #[error("Please fill in all required fields: {}", join_names(.missing))]
    Validation { missing: Vec<MissingField> },

    #[error("Notification failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Form '{kind}' has no field named '{field}'")]
    UnknownField { field: String, kind: FormKind },
}

impl FormError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Names of the missing fields, empty for other errors.
    pub fn missing_names(&self) -> Vec<&str> {
        match self {
            Self::Validation { missing } => missing.iter().map(|m| m.0.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_names(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| m.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
