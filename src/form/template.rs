//! Mail template parameters built from form answers.

use super::{FormFields, FormKind};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";
const NO_NOTES: &str = "No additional notes provided";

pub fn subject_for(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Trial => "New Trial Class Request",
        FormKind::Rental => "New Space Rental Inquiry",
        FormKind::Join => "New Enrollment Request",
    }
}

/// Parameters for the template of `kind`.
///
/// Blank optional answers are replaced with a placeholder so the mail never
/// shows an empty line.
pub fn template_params(
    kind: FormKind,
    fields: &FormFields,
    recipient: &str,
    sent_at: DateTime<Utc>,
) -> BTreeMap<String, String> {
    let or = |name: &str, fallback: &str| -> String {
        if fields.is_blank(name) {
            fallback.to_string()
        } else {
            fields.value(name).trim().to_string()
        }
    };

    let mut params = BTreeMap::new();
    let mut put = |key: &str, value: String| {
        params.insert(key.to_string(), value);
    };

    let email = or("email", NOT_PROVIDED);
    let from_name = match kind {
        FormKind::Join => or("parentName", NOT_PROVIDED),
        _ => or("name", NOT_PROVIDED),
    };

    put("to_name", recipient.to_string());
    put("from_name", from_name);
    put("from_email", email.clone());
    put("reply_to", email);
    put("phone", or("phone", NOT_PROVIDED));
    put("message", or("message", NO_NOTES));
    put("date", sent_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    put("subject", subject_for(kind).to_string());

    match kind {
        FormKind::Trial => {
            put("child_name", or("childName", NOT_PROVIDED));
            put("child_age", or("childAge", NOT_PROVIDED));
            put("experience", or("experience", NOT_SPECIFIED));
            put("preferred_date", or("preferredDate", NOT_SPECIFIED));
            put("location", or("location", NOT_SPECIFIED));
        }
        FormKind::Rental => {
            put("event_type", or("eventType", NOT_SPECIFIED));
            put("rental_date", or("rentalDate", NOT_SPECIFIED));
            put("start_time", or("startTime", NOT_SPECIFIED));
            put("end_time", or("endTime", NOT_SPECIFIED));
            put("guests", or("guests", NOT_SPECIFIED));
            put("rental_purpose", or("rentalPurpose", NOT_SPECIFIED));
        }
        FormKind::Join => {
            put("parent_name", or("parentName", NOT_PROVIDED));
            put("child_name", or("studentName", NOT_PROVIDED));
            put("child_age", or("age", NOT_PROVIDED));
            put("address", or("address", NOT_PROVIDED));
            put("location", or("branch", NOT_SPECIFIED));
        }
    }

    params
}
