//! Lead form submission controller
//!
//! Owns the form snapshot, the field error map and the submission state, and
//! turns the three presentation intents into state changes:
//! - `update_field`: write a value, re-validate only if the field already shows an error
//! - `blur_field`: always re-validate the field
//! - `submit`: validate everything, then send at most one request at a time

use crate::config::IntakeConfig;
use crate::payload::LeadPayload;
use crate::sink::LeadSink;
use crate::state::{validate_transition, SubmissionPhase, SubmissionState};
use chrono::Utc;
use lead_attribution::AttributionParams;
use lead_form::{
    validate_field_in, validate_form_with, ErrorMap, FieldName, FieldValue, FormError,
    FormSnapshot, ValidationMode,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Banner message shown when a submission fails
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Something went wrong submitting your request. Please try again or contact us directly.";

/// Everything the presentation layer renders, read under one lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Current field values
    pub snapshot: FormSnapshot,
    /// Current field errors
    pub errors: ErrorMap,
    /// Current submission state
    pub state: SubmissionState,
}

/// Result of one submit intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request is already in flight, or the lead was already accepted
    Ignored,
    /// Validation failed; nothing was sent
    Invalid {
        /// Field errors now published
        errors: ErrorMap,
        /// Field to focus and scroll to
        focus: FieldName,
    },
    /// Endpoint accepted the lead
    Succeeded,
    /// Request failed; carries the banner message
    Failed(String),
}

#[derive(Debug, Default)]
struct FormState {
    snapshot: FormSnapshot,
    errors: ErrorMap,
    submission: SubmissionState,
}

impl FormState {
    fn transition(&mut self, to: SubmissionState) {
        match validate_transition(self.submission.phase(), to.phase()) {
            Ok(()) => self.submission = to,
            Err(e) => tracing::error!("{}", e),
        }
    }
}

/// Lead form controller for one page view
///
/// Methods take `&self`; state lives behind a mutex that is never held
/// across the outbound request, so the form stays editable while a
/// submission is in flight.
pub struct LeadForm {
    state: Mutex<FormState>,
    sink: Arc<dyn LeadSink>,
    attribution: AttributionParams,
    source_tag: String,
    mode: ValidationMode,
}

impl fmt::Debug for LeadForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadForm")
            .field("state", &self.state)
            .field("attribution", &self.attribution)
            .field("source_tag", &self.source_tag)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl LeadForm {
    /// Mount an empty form
    ///
    /// `attribution` is fixed for the lifetime of the form.
    #[must_use]
    pub fn new(sink: Arc<dyn LeadSink>, attribution: AttributionParams, config: &IntakeConfig) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            sink,
            attribution,
            source_tag: config.source_tag.clone(),
            mode: config.validation_mode,
        }
    }

    /// Current field values
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.state.lock().snapshot.clone()
    }

    /// Current field errors
    #[must_use]
    pub fn errors(&self) -> ErrorMap {
        self.state.lock().errors.clone()
    }

    /// Current submission state
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state.lock().submission.clone()
    }

    /// Snapshot, errors and state together
    #[must_use]
    pub fn view(&self) -> FormView {
        let state = self.state.lock();
        FormView {
            snapshot: state.snapshot.clone(),
            errors: state.errors.clone(),
            state: state.submission.clone(),
        }
    }

    /// Attribution captured at mount
    #[inline]
    #[must_use]
    pub fn attribution(&self) -> &AttributionParams {
        &self.attribution
    }

    /// Record a user edit
    ///
    /// The field is re-validated only when it currently shows an error.
    /// Changing the service type clears the sub-service together with any
    /// sub-service error.
    ///
    /// # Errors
    /// `FormError::TypeMismatch` when the value kind does not fit the field.
    pub fn update_field(&self, field: FieldName, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let mut state = self.state.lock();
        let change = state.snapshot.set(field, value.into())?;

        if change.sub_service_reset {
            state.errors.remove(FieldName::SubService);
        }
        if state.errors.contains(field) {
            let result = validate_field_in(&state.snapshot, field, self.mode);
            state.errors.apply(field, result);
        }

        tracing::debug!(field = %field, "field updated");
        Ok(())
    }

    /// Record a user edit addressed by wire name
    ///
    /// # Errors
    /// `FormError::UnknownField` for names outside the canonical list, plus
    /// any error from [`LeadForm::update_field`].
    pub fn update_field_named(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.update_field(name.parse()?, value)
    }

    /// Field lost focus: validate it unconditionally
    ///
    /// Returns the field's error message, if any.
    pub fn blur_field(&self, field: FieldName) -> Option<String> {
        let mut state = self.state.lock();
        let result = validate_field_in(&state.snapshot, field, self.mode);
        state.errors.apply(field, result);
        tracing::debug!(field = %field, valid = result.is_none(), "field blurred");
        result.map(str::to_string)
    }

    /// Submit intent
    ///
    /// From `Idle` or `Failed`: validate the whole form. Invalid input
    /// publishes the errors and leaves the form idle. Valid input moves to
    /// `Submitting` and sends exactly one request, then settles on
    /// `Succeeded` or `Failed`.
    ///
    /// While `Submitting`, or after `Succeeded`, the intent is ignored.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };

        tracing::info!(
            source = %payload.source,
            utm_source = %payload.attribution.utm_source,
            "submitting lead"
        );
        let result = self.sink.send(&payload).await;

        let mut state = self.state.lock();
        match result {
            Ok(()) => {
                tracing::info!("lead submitted");
                state.transition(SubmissionState::Succeeded);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), "lead submission failed: {}", e);
                let message = SUBMISSION_FAILED_MESSAGE.to_string();
                state.transition(SubmissionState::Failed(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Synchronous half of `submit`: guard, validate, enter `Submitting`
    fn begin_submit(&self) -> Result<LeadPayload, SubmitOutcome> {
        let mut state = self.state.lock();

        match state.submission.phase() {
            SubmissionPhase::Submitting => {
                tracing::debug!("submit ignored: request already in flight");
                return Err(SubmitOutcome::Ignored);
            }
            SubmissionPhase::Succeeded => {
                tracing::debug!("submit ignored: lead already accepted");
                return Err(SubmitOutcome::Ignored);
            }
            SubmissionPhase::Failed => state.transition(SubmissionState::Idle),
            SubmissionPhase::Idle => {}
        }

        let errors = validate_form_with(&state.snapshot, self.mode);
        if let Some(focus) = errors.first_field() {
            tracing::debug!(count = errors.len(), focus = %focus, "submit blocked by field errors");
            state.errors = errors.clone();
            return Err(SubmitOutcome::Invalid { errors, focus });
        }

        state.errors.clear();
        state.transition(SubmissionState::Submitting);
        Ok(LeadPayload::new(
            state.snapshot.clone(),
            self.attribution.clone(),
            self.source_tag.as_str(),
            Utc::now(),
        ))
    }
}
