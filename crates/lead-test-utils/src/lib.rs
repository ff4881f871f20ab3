//! Testing utilities for the lead capture workspace
//!
//! Shared fixtures, sink doubles and a recording analytics tracker.

#![allow(missing_docs)]

use async_trait::async_trait;
use lead_attribution::{AnalyticsEvent, EventTracker};
use lead_form::{FieldName, FormSnapshot};
use lead_intake::{IntakeConfig, LeadForm, LeadPayload, LeadSink, SinkError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// The reference lead: every required field present and well-formed
pub fn valid_snapshot() -> FormSnapshot {
    FormSnapshot {
        first_name: "Jo".to_string(),
        last_name: "Smith".to_string(),
        phone: "(555) 234-5678".to_string(),
        email: "jo@example.com".to_string(),
        city: "Tampa".to_string(),
        service_type: "Chiropractic".to_string(),
        sub_service: "Adjustment".to_string(),
        preferred_time: "10:00 AM".to_string(),
        notes: String::new(),
        whatsapp_opt_in: false,
        consent: true,
    }
}

/// Type every field of `snapshot` into `form`, in canonical order
pub fn fill_form(form: &LeadForm, snapshot: &FormSnapshot) {
    for field in FieldName::ALL {
        form.update_field(field, snapshot.value(field)).unwrap();
    }
}

pub fn form_with_sink(sink: Arc<dyn LeadSink>) -> LeadForm {
    LeadForm::new(sink, Default::default(), &IntakeConfig::default())
}

/// Records payloads and answers every send the same way
#[derive(Debug)]
pub struct RecordingSink {
    payloads: Mutex<Vec<LeadPayload>>,
    reject_with: Option<u16>,
}

impl RecordingSink {
    pub fn accepting() -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    pub fn payloads(&self) -> Vec<LeadPayload> {
        self.payloads.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().len()
    }
}

#[async_trait]
impl LeadSink for RecordingSink {
    async fn send(&self, payload: &LeadPayload) -> Result<(), SinkError> {
        self.payloads.lock().push(payload.clone());
        match self.reject_with {
            Some(status) => Err(SinkError::Rejected { status }),
            None => Ok(()),
        }
    }
}

/// Holds every send open until released, to observe the in-flight state
#[derive(Debug, Default)]
pub struct GatedSink {
    calls: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl GatedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a send is in flight
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let one pending send complete successfully
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadSink for GatedSink {
    async fn send(&self, _payload: &LeadPayload) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

/// Keeps every tracked analytics event
#[derive(Debug, Default)]
pub struct RecordingTracker {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }
}

impl EventTracker for RecordingTracker {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().push(event);
    }
}
