//! Whole-form validation
//!
//! Runs every field validator independently and collects the failures into an
//! [`ErrorMap`]. A field with no entry is valid.

use crate::catalog::{City, ServiceType, SubService, TimeSlot};
use crate::field::{FieldName, FormSnapshot};
use crate::validators;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How strictly select-backed fields are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Selects only need a value
    #[default]
    Presence,
    /// Selects must also name a catalog entry, and the sub-service must
    /// belong to the selected service type
    Strict,
}

/// Field-level error messages, keyed by field
///
/// Iteration follows canonical field order, so the first entry is the field
/// the presentation layer should focus.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<FieldName, String>);

impl ErrorMap {
    /// Create an empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the error for a field
    #[inline]
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Set or clear a field's entry from a validator result
    pub fn apply(&mut self, field: FieldName, result: Option<&str>) {
        match result {
            Some(message) => self.insert(field, message),
            None => {
                self.0.remove(&field);
            }
        }
    }

    /// Clear a field's entry
    #[inline]
    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.0.remove(&field)
    }

    /// Error message for a field
    #[inline]
    #[must_use]
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field currently has an error
    #[inline]
    #[must_use]
    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    /// First errored field in canonical order
    #[inline]
    #[must_use]
    pub fn first_field(&self) -> Option<FieldName> {
        self.0.keys().next().copied()
    }

    /// Number of errored fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every field is valid
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every entry
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate entries in canonical field order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(FieldName, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validate one field of a snapshot
///
/// In [`ValidationMode::Strict`] the select-backed fields are also checked
/// against the catalog once the presence check passes.
#[must_use]
pub fn validate_field_in(
    snapshot: &FormSnapshot,
    field: FieldName,
    mode: ValidationMode,
) -> Option<&'static str> {
    let value = snapshot.value(field);
    if let Some(message) = validators::validate_field(field, Some(&value)) {
        return Some(message);
    }
    match mode {
        ValidationMode::Presence => None,
        ValidationMode::Strict => catalog_membership(snapshot, field),
    }
}

fn catalog_membership(snapshot: &FormSnapshot, field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::City => snapshot
            .city
            .parse::<City>()
            .err()
            .map(|_| "Please select a valid city"),
        FieldName::ServiceType => snapshot
            .service_type
            .parse::<ServiceType>()
            .err()
            .map(|_| "Please select a valid service type"),
        FieldName::SubService => {
            let offered = snapshot
                .sub_service
                .parse::<SubService>()
                .ok()
                .zip(snapshot.selected_service())
                .is_some_and(|(sub, service)| sub.service_type() == service);
            (!offered).then_some("Please select a specific service for the chosen service type")
        }
        FieldName::PreferredTime => snapshot
            .preferred_time
            .parse::<TimeSlot>()
            .err()
            .map(|_| "Please select a valid preferred time"),
        _ => None,
    }
}

/// Validate a whole snapshot with presence-only select checks
///
/// Every field is checked; the result holds only the failures.
#[must_use]
pub fn validate_form(snapshot: &FormSnapshot) -> ErrorMap {
    validate_form_with(snapshot, ValidationMode::Presence)
}

/// Validate a whole snapshot in the given mode
#[must_use]
pub fn validate_form_with(snapshot: &FormSnapshot, mode: ValidationMode) -> ErrorMap {
    FieldName::ALL
        .into_iter()
        .filter_map(|field| {
            validate_field_in(snapshot, field, mode).map(|message| (field, message.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_snapshot() -> FormSnapshot {
        FormSnapshot {
            first_name: "Jo".into(),
            last_name: "Smith".into(),
            phone: "(555) 234-5678".into(),
            email: "jo@example.com".into(),
            city: "Tampa".into(),
            service_type: "Chiropractic".into(),
            sub_service: "Adjustment".into(),
            preferred_time: "10:00 AM".into(),
            consent: true,
            ..FormSnapshot::default()
        }
    }

    #[test]
    fn valid_snapshot_has_no_errors() {
        assert!(validate_form(&valid_snapshot()).is_empty());
        assert!(validate_form_with(&valid_snapshot(), ValidationMode::Strict).is_empty());
    }

    #[test]
    fn missing_consent_is_the_only_error() {
        let snapshot = FormSnapshot {
            consent: false,
            ..valid_snapshot()
        };
        let expected: ErrorMap = [(
            FieldName::Consent,
            "You must agree to be contacted to proceed".to_string(),
        )]
        .into_iter()
        .collect();
        assert_eq!(validate_form(&snapshot), expected);
    }

    #[test]
    fn empty_snapshot_reports_every_required_field() {
        let errors = validate_form(&FormSnapshot::default());
        let fields: Vec<FieldName> = errors.iter().map(|(f, _)| f).collect();
        let required: Vec<FieldName> =
            FieldName::ALL.into_iter().filter(FieldName::is_required).collect();
        assert_eq!(fields, required);
        assert_eq!(errors.first_field(), Some(FieldName::FirstName));
    }

    #[test]
    fn first_field_uses_canonical_order() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldName::Consent, "c");
        errors.insert(FieldName::Email, "e");
        errors.insert(FieldName::City, "x");
        assert_eq!(errors.first_field(), Some(FieldName::Email));
    }

    #[test]
    fn strict_mode_rejects_out_of_catalog_values() {
        let snapshot = FormSnapshot {
            city: "Gotham".into(),
            sub_service: "Botox".into(),
            ..valid_snapshot()
        };
        assert!(validate_form(&snapshot).is_empty());

        let errors = validate_form_with(&snapshot, ValidationMode::Strict);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FieldName::City), Some("Please select a valid city"));
        assert!(errors.contains(FieldName::SubService));
    }

    #[test]
    fn apply_sets_and_clears() {
        let mut errors = ErrorMap::new();
        errors.apply(FieldName::Phone, Some("bad"));
        assert_eq!(errors.get(FieldName::Phone), Some("bad"));
        errors.apply(FieldName::Phone, None);
        assert!(!errors.contains(FieldName::Phone));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldName::SubService, "Please select a specific service");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "subService": "Please select a specific service" })
        );
    }
}
