//! Error types for lead intake
//!
//! - Configuration loading failures
//! - Lead sink (transport / endpoint) failures
//! - Illegal submission state transitions

use crate::state::SubmissionPhase;
use std::path::PathBuf;

/// Main intake error type
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lead could not be delivered
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Form manipulation failed
    #[error("form error: {0}")]
    Form(#[from] lead_form::FormError),

    /// Submission state machine violation
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        /// Current phase
        from: SubmissionPhase,
        /// Requested phase
        to: SubmissionPhase,
    },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Endpoint URL does not parse
    #[error("invalid endpoint url '{url}': {source}")]
    InvalidUrl {
        /// Rejected value
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// Endpoint is not http(s)
    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    /// Request timeout must be positive
    #[error("request timeout must be at least one second")]
    InvalidTimeout,

    /// Environment override does not parse
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
    },
}

/// Lead sink errors
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Network or client failure before a response arrived
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("endpoint rejected lead with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Sink-specific failure
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

impl SinkError {
    /// HTTP status, when the endpoint answered
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Unavailable(_) => None,
        }
    }
}
