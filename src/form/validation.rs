//! Mandatory-field checks.
//!
//! Every blank mandatory field is reported, not just the first, using
//! stillwater's accumulating [`Validation`].

use super::{FormError, FormFields, FormSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::{NonEmptyVec, Validation};

/// A mandatory field left blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingField(pub String);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn require(fields: &FormFields, name: &str) -> Validation<(), NonEmptyVec<MissingField>> {
    if fields.is_blank(name) {
        Validation::fail(MissingField(name.to_string()))
    } else {
        Validation::success(())
    }
}

/// Check every mandatory field of `schema`, in schema order.
pub fn validate(
    schema: &FormSchema,
    fields: &FormFields,
) -> Validation<(), NonEmptyVec<MissingField>> {
    let checks = schema
        .fields()
        .iter()
        .filter(|f| schema.is_mandatory(&f.name))
        .map(|f| require(fields, &f.name))
        .collect();
    Validation::all_vec(checks).map(|_| ())
}

/// [`validate`] flattened into a [`FormError`].
pub fn check(schema: &FormSchema, fields: &FormFields) -> Result<(), FormError> {
    validate(schema, fields)
        .into_result()
        .map_err(|missing| FormError::Validation {
            missing: missing.into_vec(),
        })
}
