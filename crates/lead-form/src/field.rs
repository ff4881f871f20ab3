//! Form fields and snapshots
//!
//! The canonical field list fixes both the wire names (camelCase) and the
//! order used when picking the first errored field to focus.

use crate::catalog::{ServiceType, SubService};
use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical lead form fields, declared in display order
///
/// `Ord` follows declaration order, so sorted collections of field names
/// iterate in the order the fields appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// US phone number
    Phone,
    /// Email address
    Email,
    /// Clinic city
    City,
    /// Service category
    ServiceType,
    /// Service within the selected category
    SubService,
    /// Preferred appointment slot
    PreferredTime,
    /// Free-text notes
    Notes,
    /// WhatsApp contact opt-in
    WhatsappOptIn,
    /// Consent to be contacted
    Consent,
}

impl FieldName {
    /// All fields in canonical order
    pub const ALL: [FieldName; 11] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Phone,
        FieldName::Email,
        FieldName::City,
        FieldName::ServiceType,
        FieldName::SubService,
        FieldName::PreferredTime,
        FieldName::Notes,
        FieldName::WhatsappOptIn,
        FieldName::Consent,
    ];

    /// Wire name of the field
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Phone => "phone",
            FieldName::Email => "email",
            FieldName::City => "city",
            FieldName::ServiceType => "serviceType",
            FieldName::SubService => "subService",
            FieldName::PreferredTime => "preferredTime",
            FieldName::Notes => "notes",
            FieldName::WhatsappOptIn => "whatsappOptIn",
            FieldName::Consent => "consent",
        }
    }

    /// Kind of value the field holds
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldName::WhatsappOptIn | FieldName::Consent => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    /// Whether the field must pass validation before submission
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        !matches!(self, FieldName::Notes | FieldName::WhatsappOptIn)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Value kinds accepted by form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text or a selected option label
    Text,
    /// Checkbox
    Flag,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Flag => f.write_str("boolean"),
        }
    }
}

/// Raw value delivered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input or select value
    Text(String),
    /// Checkbox state
    Flag(bool),
}

impl FieldValue {
    /// Text content, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    /// Checkbox state, if this is a flag value
    #[inline]
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Outcome of writing a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldChange {
    /// Sub-service was cleared because the service type was written
    pub sub_service_reset: bool,
}

/// Complete set of lead fields at a point in time
///
/// Missing fields deserialize as empty text / `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// US phone number as typed
    pub phone: String,
    /// Email address
    pub email: String,
    /// Selected city label, empty when unselected
    pub city: String,
    /// Selected service type label
    pub service_type: String,
    /// Selected sub-service label
    pub sub_service: String,
    /// Selected time slot label
    pub preferred_time: String,
    /// Optional notes
    pub notes: String,
    /// WhatsApp opt-in
    pub whatsapp_opt_in: bool,
    /// Consent to be contacted
    pub consent: bool,
}

impl FormSnapshot {
    /// Create an empty snapshot (all text empty, all flags false)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field
    #[must_use]
    pub fn value(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::WhatsappOptIn => FieldValue::Flag(self.whatsapp_opt_in),
            FieldName::Consent => FieldValue::Flag(self.consent),
            text => FieldValue::Text(self.text(text).unwrap_or_default().to_string()),
        }
    }

    /// Borrow a text field; `None` for flag fields
    #[must_use]
    pub fn text(&self, field: FieldName) -> Option<&str> {
        let value = match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Phone => &self.phone,
            FieldName::Email => &self.email,
            FieldName::City => &self.city,
            FieldName::ServiceType => &self.service_type,
            FieldName::SubService => &self.sub_service,
            FieldName::PreferredTime => &self.preferred_time,
            FieldName::Notes => &self.notes,
            FieldName::WhatsappOptIn | FieldName::Consent => return None,
        };
        Some(value.as_str())
    }

    /// Write a field value
    ///
    /// Writing `serviceType` always clears `subService`, since the valid
    /// sub-service options depend on the selected service type.
    ///
    /// # Errors
    /// `FormError::TypeMismatch` when the value kind does not fit the field.
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<FieldChange, FormError> {
        if value.kind() != field.kind() {
            return Err(FormError::TypeMismatch {
                field,
                expected: field.kind(),
            });
        }

        let mut change = FieldChange::default();
        match (field, value) {
            (FieldName::WhatsappOptIn, FieldValue::Flag(b)) => self.whatsapp_opt_in = b,
            (FieldName::Consent, FieldValue::Flag(b)) => self.consent = b,
            (FieldName::ServiceType, FieldValue::Text(s)) => {
                self.service_type = s;
                self.sub_service.clear();
                change.sub_service_reset = true;
            }
            (field, FieldValue::Text(s)) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = s;
                }
            }
            // Kinds were checked above
            (_, FieldValue::Flag(_)) => {}
        }
        Ok(change)
    }

    fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        let slot = match field {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Phone => &mut self.phone,
            FieldName::Email => &mut self.email,
            FieldName::City => &mut self.city,
            FieldName::ServiceType => &mut self.service_type,
            FieldName::SubService => &mut self.sub_service,
            FieldName::PreferredTime => &mut self.preferred_time,
            FieldName::Notes => &mut self.notes,
            FieldName::WhatsappOptIn | FieldName::Consent => return None,
        };
        Some(slot)
    }

    /// Selected service type, if it names a catalog entry
    #[inline]
    #[must_use]
    pub fn selected_service(&self) -> Option<ServiceType> {
        self.service_type.parse().ok()
    }

    /// Sub-service options offered for the selected service type
    ///
    /// Empty until a known service type is selected.
    #[must_use]
    pub fn sub_service_options(&self) -> &'static [SubService] {
        self.selected_service()
            .map_or(&[], |service| service.sub_services())
    }
}
