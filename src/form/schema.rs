//! Which fields each form kind has, their defaults, and which are mandatory.

use super::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of form the site submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Free trial class booking.
    #[default]
    Trial,
    /// Studio space rental inquiry.
    Rental,
    /// Enrollment; sent through the trial template.
    Join,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Rental => "rental",
            Self::Join => "join",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(Self::Trial),
            "rental" => Ok(Self::Rental),
            "join" => Ok(Self::Join),
            other => Err(format!("unknown form kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Value the field holds on a fresh or reset form.
    #[serde(default)]
    pub default: String,
}

impl FieldSpec {
    fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: String::new(),
        }
    }
}

const COMMON: [&str; 4] = ["name", "email", "phone", "message"];
const TRIAL_EXTRA: [&str; 5] = ["childName", "childAge", "experience", "preferredDate", "location"];
const RENTAL_EXTRA: [&str; 6] = [
    "eventType",
    "rentalDate",
    "startTime",
    "endTime",
    "guests",
    "rentalPurpose",
];
const JOIN_FIELDS: [&str; 7] = [
    "parentName",
    "studentName",
    "age",
    "address",
    "phone",
    "email",
    "branch",
];

/// Field layout of one form kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    kind: FormKind,
    fields: Vec<FieldSpec>,
    mandatory: Vec<String>,
}

impl FormSchema {
    pub fn trial() -> Self {
        let fields = COMMON
            .iter()
            .chain(TRIAL_EXTRA.iter())
            .map(|name| match *name {
                "experience" => FieldSpec {
                    name: "experience".to_string(),
                    default: "beginner".to_string(),
                },
                other => FieldSpec::blank(other),
            })
            .collect();
        Self {
            kind: FormKind::Trial,
            fields,
            mandatory: owned(&["name", "email", "phone", "childName", "childAge"]),
        }
    }

    pub fn rental() -> Self {
        Self {
            kind: FormKind::Rental,
            fields: COMMON
                .iter()
                .chain(RENTAL_EXTRA.iter())
                .map(|name| FieldSpec::blank(name))
                .collect(),
            mandatory: owned(&[
                "name",
                "email",
                "phone",
                "eventType",
                "rentalDate",
                "startTime",
                "endTime",
                "guests",
            ]),
        }
    }

    pub fn join() -> Self {
        Self {
            kind: FormKind::Join,
            fields: JOIN_FIELDS.iter().map(|name| FieldSpec::blank(name)).collect(),
            mandatory: owned(&JOIN_FIELDS),
        }
    }

    pub fn for_kind(kind: FormKind) -> Self {
        match kind {
            FormKind::Trial => Self::trial(),
            FormKind::Rental => Self::rental(),
            FormKind::Join => Self::join(),
        }
    }

    /// Replace the mandatory subset. Every name must be a field of this form.
    pub fn with_mandatory<I, S>(mut self, names: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(unknown) = names.iter().find(|n| !self.has_field(n)) {
            return Err(FormError::UnknownField {
                field: unknown.clone(),
                kind: self.kind,
            });
        }
        self.mandatory = names;
        Ok(self)
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn mandatory(&self) -> &[String] {
        &self.mandatory
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn is_mandatory(&self, name: &str) -> bool {
        self.mandatory.iter().any(|m| m == name)
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
