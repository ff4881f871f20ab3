//! Outbound lead payload
//!
//! One flat JSON object: every form field by canonical name, every `utm_*`
//! key, the page `source` tag and an ISO-8601 `timestamp`.

use chrono::{DateTime, SecondsFormat, Utc};
use lead_attribution::AttributionParams;
use lead_form::FormSnapshot;
use serde::{Serialize, Serializer};

/// Body of the intake POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadPayload {
    /// Form fields at submit time
    #[serde(flatten)]
    pub form: FormSnapshot,
    /// Attribution captured at page load
    #[serde(flatten)]
    pub attribution: AttributionParams,
    /// Originating page tag
    pub source: String,
    /// Submission time
    #[serde(serialize_with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,
}

impl LeadPayload {
    /// Assemble a payload
    #[must_use]
    pub fn new(
        form: FormSnapshot,
        attribution: AttributionParams,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            form,
            attribution,
            source: source.into(),
            timestamp,
        }
    }
}

fn iso8601_millis<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
