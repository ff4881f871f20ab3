//! Lead sinks
//!
//! A sink delivers one payload, once. Retries are not attempted here or by
//! the controller.

use crate::config::IntakeConfig;
use crate::error::{ConfigError, SinkError};
use crate::payload::LeadPayload;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Destination for submitted leads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Deliver one lead
    ///
    /// # Errors
    /// Any [`SinkError`]; the controller treats every error as a failed submission.
    async fn send(&self, payload: &LeadPayload) -> Result<(), SinkError>;
}

/// POSTs leads as JSON to the intake endpoint
#[derive(Debug, Clone)]
pub struct HttpLeadSink {
    client: Client,
    endpoint: Url,
}

impl HttpLeadSink {
    /// Build a sink from configuration
    ///
    /// # Errors
    /// `IntakeError::Config` for an unusable endpoint, `IntakeError::Sink`
    /// when the HTTP client cannot be built.
    pub fn from_config(config: &IntakeConfig) -> Result<Self, crate::IntakeError> {
        let endpoint = config.endpoint()?;
        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout.into());
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(SinkError::from)?;
        Ok(Self { client, endpoint })
    }

    /// Build a sink around an existing client
    #[inline]
    #[must_use]
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Target endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LeadSink for HttpLeadSink {
    async fn send(&self, payload: &LeadPayload) -> Result<(), SinkError> {
        tracing::debug!(endpoint = %self.endpoint, "posting lead");

        // Body is ignored; only the status matters
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "lead accepted");
            Ok(())
        } else {
            Err(SinkError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
