//! Submission state machine

use crate::error::IntakeError;
use serde::Serialize;
use std::fmt;

/// Submission lifecycle of one form on one page view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SubmissionState {
    /// Editable, nothing in flight
    #[default]
    Idle,
    /// One request in flight
    Submitting,
    /// Endpoint acknowledged the lead; terminal for the page view
    Succeeded,
    /// Last request failed; carries the banner message
    Failed(String),
}

impl SubmissionState {
    /// Phase without payload
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            Self::Idle => SubmissionPhase::Idle,
            Self::Submitting => SubmissionPhase::Submitting,
            Self::Succeeded => SubmissionPhase::Succeeded,
            Self::Failed(_) => SubmissionPhase::Failed,
        }
    }

    /// Submission-level error message, if the last request failed
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True while a request is in flight
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Payload-free submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionPhase {
    /// See [`SubmissionState::Idle`]
    Idle,
    /// See [`SubmissionState::Submitting`]
    Submitting,
    /// See [`SubmissionState::Succeeded`]
    Succeeded,
    /// See [`SubmissionState::Failed`]
    Failed,
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Validates a submission state transition.
///
/// Illegal transitions return an error; with the `strict-transitions`
/// feature they panic instead.
pub fn validate_transition(from: SubmissionPhase, to: SubmissionPhase) -> Result<(), IntakeError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-transitions")]
        panic!("Illegal submission transition attempted: {from} -> {to}");

        Err(IntakeError::IllegalTransition { from, to })
    }
}

/// Phases reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: SubmissionPhase) -> &'static [SubmissionPhase] {
    use SubmissionPhase::*;
    match from {
        Idle => &[Submitting],
        Submitting => &[Succeeded, Failed],
        Failed => &[Idle],
        Succeeded => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionPhase::*;

    const ALL: [SubmissionPhase; 4] = [Idle, Submitting, Succeeded, Failed];

    #[test]
    fn happy_path_is_allowed() {
        assert!(validate_transition(Idle, Submitting).is_ok());
        assert!(validate_transition(Submitting, Succeeded).is_ok());
        assert!(validate_transition(Submitting, Failed).is_ok());
        assert!(validate_transition(Failed, Idle).is_ok());
    }

    #[cfg(not(feature = "strict-transitions"))]
    #[test]
    fn succeeded_is_terminal() {
        for to in ALL {
            assert!(matches!(
                validate_transition(Succeeded, to),
                Err(IntakeError::IllegalTransition { from: Succeeded, .. })
            ));
        }
    }

    #[cfg(not(feature = "strict-transitions"))]
    #[test]
    fn no_second_request_from_submitting() {
        assert!(validate_transition(Submitting, Submitting).is_err());
        assert!(validate_transition(Submitting, Idle).is_err());
        assert!(validate_transition(Idle, Succeeded).is_err());
    }

    #[test]
    fn failed_message_is_exposed() {
        let state = SubmissionState::Failed("try again".into());
        assert_eq!(state.phase(), Failed);
        assert_eq!(state.error_message(), Some("try again"));
        assert_eq!(SubmissionState::Idle.error_message(), None);
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(SubmissionState::Failed("oops".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "failed", "message": "oops" }));
        let json = serde_json::to_value(SubmissionState::Idle).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "idle" }));
    }
}
