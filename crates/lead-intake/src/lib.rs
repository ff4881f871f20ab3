//! Lead Intake - form submission pipeline
//!
//! The controller behind the landing-page lead form:
//! - Owns field values, field errors and the submission state
//! - Validates on blur, on edit of an errored field, and in full on submit
//! - Sends at most one request at a time to a pluggable [`LeadSink`]
//! - Ships an HTTP sink posting JSON to the configured intake endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use lead_intake::{HttpLeadSink, IntakeConfig, LeadForm, SubmitOutcome};
//! use lead_attribution::AttributionParams;
//! use lead_form::FieldName;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntakeConfig::load(None)?;
//! let sink = Arc::new(HttpLeadSink::from_config(&config)?);
//! let form = LeadForm::new(sink, AttributionParams::default(), &config);
//!
//! form.update_field(FieldName::FirstName, "Jo")?;
//! if let SubmitOutcome::Invalid { focus, .. } = form.submit().await {
//!     println!("fix {focus} first");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod payload;
pub mod sink;
pub mod state;

// Re-exports for convenience
pub use config::IntakeConfig;
pub use controller::{FormView, LeadForm, SubmitOutcome, SUBMISSION_FAILED_MESSAGE};
pub use error::{ConfigError, IntakeError, SinkError};
pub use page::{LandingPage, PageEnvironment, LANDING_PAGE};
pub use payload::LeadPayload;
pub use sink::{HttpLeadSink, LeadSink};
pub use state::{SubmissionPhase, SubmissionState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the lead form
    pub use crate::{
        IntakeConfig, LandingPage, LeadForm, LeadSink, PageEnvironment, SubmissionState,
        SubmitOutcome,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
