//! Subcommand bodies
//!
//! Commands return plain data; `main` prints it and picks the exit code.

use anyhow::{Context, Result};
use lead_attribution::{
    parse_query, AttributionParams, MemorySessionStorage, StaticLocation, TracingTracker,
};
use lead_form::{validate_form_with, ErrorMap, FieldName, FormSnapshot, ValidationMode};
use lead_intake::{
    HttpLeadSink, IntakeConfig, LandingPage, PageEnvironment, SubmissionState, SubmitOutcome,
};
use std::path::Path;
use std::sync::Arc;

/// Read a lead from a JSON file in the wire shape
pub(crate) fn read_snapshot(path: &Path) -> Result<FormSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a lead form document", path.display()))
}

/// Validate a stored lead without sending it
pub(crate) fn validate(path: &Path, mode: ValidationMode) -> Result<ErrorMap> {
    let snapshot = read_snapshot(path)?;
    let errors = validate_form_with(&snapshot, mode);
    tracing::info!(file = %path.display(), ?mode, errors = errors.len(), "lead validated");
    Ok(errors)
}

/// Options for `submit`
#[derive(Debug, Clone, Copy)]
pub(crate) struct SubmitArgs<'a> {
    pub(crate) file: &'a Path,
    pub(crate) config: Option<&'a Path>,
    pub(crate) url: Option<&'a str>,
    pub(crate) query: Option<&'a str>,
    pub(crate) strict: bool,
}

impl<'a> SubmitArgs<'a> {
    pub(crate) fn new(file: &'a Path) -> Self {
        Self {
            file,
            config: None,
            url: None,
            query: None,
            strict: false,
        }
    }
}

/// What a `submit` run ended with
#[derive(Debug)]
pub(crate) struct SubmitReport {
    pub(crate) outcome: SubmitOutcome,
    pub(crate) state: SubmissionState,
    pub(crate) attribution: AttributionParams,
}

impl SubmitReport {
    pub(crate) fn succeeded(&self) -> bool {
        matches!(self.outcome, SubmitOutcome::Succeeded)
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        let mut report = serde_json::json!({
            "submission": self.state,
            "attribution": self.attribution,
        });
        if let SubmitOutcome::Invalid { errors, focus } = &self.outcome {
            report["errors"] = serde_json::json!(errors);
            report["focus"] = serde_json::json!(focus);
        }
        report
    }
}

/// Resolve configuration with command-line overrides on top
pub(crate) fn resolve_config(args: &SubmitArgs<'_>) -> Result<IntakeConfig> {
    let mut config = IntakeConfig::load(args.config).context("failed to load intake configuration")?;
    if let Some(url) = args.url {
        config = config.with_endpoint(url);
    }
    if args.strict {
        config = config.with_validation_mode(ValidationMode::Strict);
    }
    config.validate().context("invalid intake configuration")?;
    if config.is_placeholder() {
        tracing::warn!(endpoint = %config.endpoint_url, "intake endpoint is the placeholder; set --url or LEAD_INTAKE_URL");
    }
    Ok(config)
}

/// Mount a landing page, type the lead in, and submit it once
pub(crate) async fn submit(args: SubmitArgs<'_>) -> Result<SubmitReport> {
    let config = resolve_config(&args)?;
    let snapshot = read_snapshot(args.file)?;
    let sink = Arc::new(HttpLeadSink::from_config(&config)?);

    let location = StaticLocation::new(args.query.unwrap_or_default());
    let storage = MemorySessionStorage::new();
    let page = LandingPage::mount(
        PageEnvironment {
            location: &location,
            storage: &storage,
            tracker: &TracingTracker,
        },
        sink,
        &config,
    );

    let form = page.form();
    for field in FieldName::ALL {
        form.update_field(field, snapshot.value(field))?;
    }
    let outcome = form.submit().await;
    Ok(SubmitReport {
        outcome,
        state: form.state(),
        attribution: form.attribution().clone(),
    })
}

/// Attribution parameters carried by a URL or bare query string
pub(crate) fn attribution(location: &str) -> AttributionParams {
    parse_query(location)
}
