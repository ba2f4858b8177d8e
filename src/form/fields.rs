use super::{FormError, FormKind, FormSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current answers of one form, keyed by field name.
///
/// Only the fields of the form's schema exist; setting anything else is an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    kind: FormKind,
    values: BTreeMap<String, String>,
}

impl FormFields {
    /// Every field at its default.
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            kind: schema.kind(),
            values: schema
                .fields()
                .iter()
                .map(|f| (f.name.clone(), f.default.clone()))
                .collect(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The value, or `""` for fields this form lacks.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(FormError::UnknownField {
                field: name.to_string(),
                kind: self.kind,
            }),
        }
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self, name: &str) -> bool {
        self.value(name).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Put every field back to its schema default.
    pub fn reset_to(&mut self, schema: &FormSchema) {
        *self = Self::from_schema(schema);
    }

    /// Carry answers from the enrollment form over to the trial booking it
    /// hands off to.
    ///
    /// ```rust
    /// use choreo::form::{FormFields, FormSchema};
    ///
    /// let mut join = FormFields::from_schema(&FormSchema::join());
    /// join.set("studentName", "Asha").unwrap();
    /// join.set("branch", "palladam").unwrap();
    ///
    /// let trial = FormFields::join_prefill(&join, &FormSchema::trial());
    /// assert_eq!(trial.get("childName"), Some("Asha"));
    /// assert_eq!(trial.get("location"), Some("palladam"));
    /// assert_eq!(trial.get("experience"), Some("beginner"));
    /// ```
    pub fn join_prefill(join: &FormFields, trial: &FormSchema) -> Self {
        const MAPPING: [(&str, &str); 6] = [
            ("parentName", "name"),
            ("studentName", "childName"),
            ("age", "childAge"),
            ("branch", "location"),
            ("phone", "phone"),
            ("email", "email"),
        ];

        let mut fields = Self::from_schema(trial);
        for (from, to) in MAPPING {
            if let (Some(value), Some(slot)) = (join.get(from), fields.values.get_mut(to)) {
                if !value.trim().is_empty() {
                    *slot = value.to_string();
                }
            }
        }
        fields
    }

    /// Apply `other`'s non-blank values to the fields both forms share.
    pub fn merge_from(&mut self, other: &FormFields) {
        for (name, value) in other.iter() {
            if value.trim().is_empty() {
                continue;
            }
            if let Some(slot) = self.values.get_mut(name) {
                *slot = value.to_string();
            }
        }
    }
}
