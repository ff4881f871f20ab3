use lead_attribution::{MemorySessionStorage, StaticLocation};
use lead_form::{FieldName, FormSnapshot, ValidationMode};
use lead_intake::{
    IntakeConfig, LandingPage, LeadForm, PageEnvironment, SubmissionPhase, SubmissionState,
    SubmitOutcome, LANDING_PAGE,
};
use lead_test_utils::{
    fill_form, form_with_sink, valid_snapshot, GatedSink, RecordingSink, RecordingTracker,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn reference_lead_goes_idle_submitting_succeeded() {
    let sink = Arc::new(GatedSink::new());
    let form = Arc::new(form_with_sink(sink.clone()));
    fill_form(&form, &valid_snapshot());
    assert_eq!(form.state(), SubmissionState::Idle);

    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    sink.wait_entered().await;
    assert_eq!(form.state(), SubmissionState::Submitting);

    sink.release();
    assert_eq!(pending.await.unwrap(), SubmitOutcome::Succeeded);
    assert_eq!(form.state(), SubmissionState::Succeeded);
    assert_eq!(sink.calls(), 1);
}

#[tokio::test]
async fn double_submit_while_pending_sends_once() {
    let sink = Arc::new(GatedSink::new());
    let form = Arc::new(form_with_sink(sink.clone()));
    fill_form(&form, &valid_snapshot());

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    sink.wait_entered().await;

    assert_eq!(form.submit().await, SubmitOutcome::Ignored);
    assert_eq!(form.submit().await, SubmitOutcome::Ignored);
    assert_eq!(form.state().phase(), SubmissionPhase::Submitting);

    sink.release();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
    assert_eq!(sink.calls(), 1);
}

#[tokio::test]
async fn missing_consent_stays_idle_with_single_error() {
    let sink = Arc::new(RecordingSink::accepting());
    let form = form_with_sink(sink.clone());
    fill_form(
        &form,
        &FormSnapshot {
            consent: false,
            ..valid_snapshot()
        },
    );

    let outcome = form.submit().await;

    match outcome {
        SubmitOutcome::Invalid { errors, focus } => {
            assert_eq!(focus, FieldName::Consent);
            assert_eq!(
                serde_json::to_value(&errors).unwrap(),
                serde_json::json!({ "consent": "You must agree to be contacted to proceed" })
            );
        }
        other => panic!("expected invalid outcome, got {other:?}"),
    }
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn focus_follows_canonical_order_not_error_count() {
    let sink = Arc::new(RecordingSink::accepting());
    let form = form_with_sink(sink.clone());
    fill_form(
        &form,
        &FormSnapshot {
            email: "broken".into(),
            phone: "123".into(),
            consent: false,
            ..valid_snapshot()
        },
    );

    let outcome = form.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid { focus: FieldName::Phone, ref errors } if errors.len() == 3
    ));
}

#[tokio::test]
async fn http_500_fails_and_keeps_the_form() {
    let sink = Arc::new(RecordingSink::rejecting(500));
    let form = form_with_sink(sink.clone());
    fill_form(&form, &valid_snapshot());

    let outcome = form.submit().await;

    let SubmitOutcome::Failed(message) = outcome else {
        panic!("submission should fail");
    };
    assert!(!message.is_empty());
    assert_eq!(form.state(), SubmissionState::Failed(message));
    assert_eq!(form.snapshot(), valid_snapshot());
    assert!(form.errors().is_empty());
    assert_eq!(sink.calls(), 1);
}

#[tokio::test]
async fn payload_carries_form_attribution_and_source() {
    let sink = Arc::new(RecordingSink::accepting());
    let storage = MemorySessionStorage::new();
    let tracker = RecordingTracker::new();
    let location = StaticLocation::new("https://example.com/?utm_source=google&utm_medium=cpc");
    let env = PageEnvironment {
        location: &location,
        storage: &storage,
        tracker: &tracker,
    };
    let config = IntakeConfig::default().with_source_tag("spring_landing");

    let page = LandingPage::mount(env, sink.clone(), &config);
    fill_form(page.form(), &valid_snapshot());
    assert_eq!(page.form().submit().await, SubmitOutcome::Succeeded);

    let payloads = sink.payloads();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload.form, valid_snapshot());
    assert_eq!(payload.attribution.utm_source, "google");
    assert_eq!(payload.attribution.utm_campaign, "");
    assert_eq!(payload.source, "spring_landing");

    let events = tracker.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "page_view");
    assert_eq!(events[0].data["page"], LANDING_PAGE);
    assert_eq!(events[0].data["utm_medium"], "cpc");
}

#[tokio::test]
async fn strict_mode_blocks_out_of_catalog_selection() {
    let sink = Arc::new(RecordingSink::accepting());
    let config = IntakeConfig::default().with_validation_mode(ValidationMode::Strict);
    let form = LeadForm::new(sink.clone(), Default::default(), &config);
    fill_form(
        &form,
        &FormSnapshot {
            city: "Gotham".into(),
            ..valid_snapshot()
        },
    );

    assert!(matches!(
        form.submit().await,
        SubmitOutcome::Invalid { focus: FieldName::City, .. }
    ));
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn remount_reuses_session_attribution() {
    let storage = MemorySessionStorage::new();
    let tracker = RecordingTracker::new();
    let config = IntakeConfig::default();
    let sink = Arc::new(RecordingSink::accepting());

    let first_location = StaticLocation::new("/?utm_campaign=spring");
    let _first = LandingPage::mount(
        PageEnvironment {
            location: &first_location,
            storage: &storage,
            tracker: &tracker,
        },
        sink.clone(),
        &config,
    );

    let plain_location = StaticLocation::new("/");
    let page = LandingPage::mount(
        PageEnvironment {
            location: &plain_location,
            storage: &storage,
            tracker: &tracker,
        },
        sink,
        &config,
    );

    assert_eq!(page.attribution().utm_campaign, "spring");
    assert_eq!(tracker.events().len(), 2);
}
