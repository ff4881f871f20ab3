//! Analytics events
//!
//! A tracked event is a name, a flat bag of properties and a timestamp, the
//! shape tag managers expect on their data layer.

use crate::params::AttributionParams;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Event name tracked when the landing page mounts
pub const PAGE_VIEW: &str = "page_view";

/// One analytics event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Event name
    pub event: String,
    /// Event properties, flattened next to `event`
    #[serde(flatten)]
    pub data: Map<String, Value>,
    /// When the event was tracked
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event with no properties
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add a property
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// `page_view` for a page, credited to the captured campaign
    #[must_use]
    pub fn page_view(page: &str, params: &AttributionParams) -> Self {
        Self::new(PAGE_VIEW)
            .with("page", page)
            .with("utm_source", params.utm_source.as_str())
            .with("utm_medium", params.utm_medium.as_str())
            .with("utm_campaign", params.utm_campaign.as_str())
    }
}

/// Sink for analytics events
pub trait EventTracker: Send + Sync {
    /// Record an event; must not fail or block
    fn track(&self, event: AnalyticsEvent);
}

/// Emits events as `tracing` records under the `analytics` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracker;

impl EventTracker for TracingTracker {
    fn track(&self, event: AnalyticsEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::info!(target: "analytics", event = %event.event, %payload, "analytics event");
            }
            Err(e) => {
                tracing::warn!(target: "analytics", event = %event.event, "unencodable analytics event: {}", e);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl EventTracker for NoopTracker {
    fn track(&self, _event: AnalyticsEvent) {}
}
