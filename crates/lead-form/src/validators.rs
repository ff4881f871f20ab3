//! Field validators
//!
//! One pure rule per field. Each returns `None` when the value is valid and
//! the user-facing message otherwise. Missing input is validated exactly like
//! an empty string (text fields) or `false` (flags).

use crate::field::{FieldName, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: no whitespace or extra `@` in any part
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// US number: optional `+1`, area code starting 2-9, common separators
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[1]?[\s.-]?[(]?[2-9][0-8][0-9][)]?[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}$")
        .expect("phone pattern compiles")
});

/// Minimum digits a phone number must carry
pub const MIN_PHONE_DIGITS: usize = 10;

/// Minimum characters for a trimmed name
pub const MIN_NAME_CHARS: usize = 2;

/// Message shown when consent is missing
pub const CONSENT_REQUIRED: &str = "You must agree to be contacted to proceed";

/// Validate a first name
#[must_use]
pub fn first_name(value: &str) -> Option<&'static str> {
    name(
        value,
        "First name is required",
        "First name must be at least 2 characters",
    )
}

/// Validate a last name
#[must_use]
pub fn last_name(value: &str) -> Option<&'static str> {
    name(
        value,
        "Last name is required",
        "Last name must be at least 2 characters",
    )
}

fn name(value: &str, required: &'static str, too_short: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(required)
    } else if trimmed.chars().count() < MIN_NAME_CHARS {
        Some(too_short)
    } else {
        None
    }
}

/// Validate a US phone number
#[must_use]
pub fn phone(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Phone number is required");
    }
    if value.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
        return Some("Phone number must be at least 10 digits");
    }
    if !PHONE_PATTERN.is_match(value) {
        return Some("Please enter a valid US phone number");
    }
    None
}

/// Validate an email address
#[must_use]
pub fn email(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Email address is required");
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Some("Please enter a valid email address");
    }
    None
}

/// City must be selected
#[must_use]
pub fn city(value: &str) -> Option<&'static str> {
    value.is_empty().then_some("Please select a city")
}

/// Service type must be selected
#[must_use]
pub fn service_type(value: &str) -> Option<&'static str> {
    value.is_empty().then_some("Please select a service type")
}

/// Sub-service must be selected
#[must_use]
pub fn sub_service(value: &str) -> Option<&'static str> {
    value.is_empty().then_some("Please select a specific service")
}

/// Preferred time must be selected
#[must_use]
pub fn preferred_time(value: &str) -> Option<&'static str> {
    value.is_empty().then_some("Please select a preferred time")
}

/// Consent must be given
#[must_use]
pub fn consent(value: bool) -> Option<&'static str> {
    (!value).then_some(CONSENT_REQUIRED)
}

/// Validate one field's raw value
///
/// `None` (or a value of the wrong kind) counts as empty text / `false`.
/// Optional fields (`notes`, `whatsappOptIn`) are always valid.
#[must_use]
pub fn validate_field(field: FieldName, value: Option<&FieldValue>) -> Option<&'static str> {
    let text = value.and_then(FieldValue::as_text).unwrap_or("");
    match field {
        FieldName::FirstName => first_name(text),
        FieldName::LastName => last_name(text),
        FieldName::Phone => phone(text),
        FieldName::Email => email(text),
        FieldName::City => city(text),
        FieldName::ServiceType => service_type(text),
        FieldName::SubService => sub_service(text),
        FieldName::PreferredTime => preferred_time(text),
        FieldName::Consent => consent(value.and_then(FieldValue::as_flag).unwrap_or(false)),
        FieldName::Notes | FieldName::WhatsappOptIn => None,
    }
}
