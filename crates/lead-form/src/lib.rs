//! Lead Form Core
//!
//! Data model and client-side validation for the landing-page lead form.
//!
//! # Overview
//!
//! - **FormSnapshot**: every lead field at a point in time
//! - **Catalog**: closed enumerations for city, service, sub-service and time slot
//! - **Validators**: one pure rule per field
//! - **Aggregator**: `validate_form` producing an [`ErrorMap`] of failed fields only
//!
//! # Example
//!
//! ```rust
//! use lead_form::{validate_form, FieldName, FormSnapshot};
//!
//! let mut snapshot = FormSnapshot::default();
//! snapshot.first_name = "Jo".to_string();
//!
//! let errors = validate_form(&snapshot);
//! assert!(!errors.contains(FieldName::FirstName));
//! assert!(errors.contains(FieldName::Consent));
//! assert_eq!(errors.first_field(), Some(FieldName::LastName));
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod field;
pub mod phone;
pub mod validators;

// Re-exports
pub use aggregate::{validate_field_in, validate_form, validate_form_with, ErrorMap, ValidationMode};
pub use catalog::{City, ServiceType, SubService, TimeSlot};
pub use error::FormError;
pub use field::{FieldKind, FieldName, FieldValue, FormSnapshot};
pub use phone::format_phone_number;
pub use validators::validate_field;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for form handling
    pub use crate::{
        validate_field, validate_form, ErrorMap, FieldName, FieldValue, FormError, FormSnapshot,
        ValidationMode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
