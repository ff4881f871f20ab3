//! Landing page mount
//!
//! Everything that happens once per page view before the user touches the
//! form: the single attribution read, the `page_view` event, and creation
//! of the form controller.

use crate::config::IntakeConfig;
use crate::controller::LeadForm;
use crate::sink::LeadSink;
use lead_attribution::{
    AnalyticsEvent, AttributionCapture, AttributionParams, EventTracker, PageLocation,
    SessionStorage,
};
use std::sync::Arc;

/// Page name reported in `page_view`
pub const LANDING_PAGE: &str = "landing";

/// Browser-bound collaborators, injected at mount
#[derive(Clone, Copy)]
pub struct PageEnvironment<'a> {
    /// Current location
    pub location: &'a dyn PageLocation,
    /// Session-scoped storage
    pub storage: &'a dyn SessionStorage,
    /// Analytics destination
    pub tracker: &'a dyn EventTracker,
}

/// A mounted landing page
#[derive(Debug)]
pub struct LandingPage {
    form: LeadForm,
}

impl LandingPage {
    /// Mount the page
    ///
    /// Reads attribution exactly once (falling back to params stored earlier
    /// in the session), tracks `page_view`, and mounts an empty form.
    #[must_use]
    pub fn mount(env: PageEnvironment<'_>, sink: Arc<dyn LeadSink>, config: &IntakeConfig) -> Self {
        let attribution = AttributionCapture::new(env.location).capture_and_persist(env.storage);
        tracing::info!(
            utm_source = %attribution.utm_source,
            utm_medium = %attribution.utm_medium,
            utm_campaign = %attribution.utm_campaign,
            "landing page mounted"
        );
        env.tracker
            .track(AnalyticsEvent::page_view(LANDING_PAGE, &attribution));

        Self {
            form: LeadForm::new(sink, attribution, config),
        }
    }

    /// The lead form
    #[inline]
    #[must_use]
    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    /// Attribution captured at mount
    #[inline]
    #[must_use]
    pub fn attribution(&self) -> &AttributionParams {
        self.form.attribution()
    }

    /// Take the form out of the page
    #[inline]
    #[must_use]
    pub fn into_form(self) -> LeadForm {
        self.form
    }
}
