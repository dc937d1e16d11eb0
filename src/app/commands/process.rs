//! Enrichment pipeline orchestration.
//!
//! One snapshot in, one artifact out:
//! `Start -> PromptBuilt -> Invoked -> Normalized -> Validated`, ending in
//! `Persisted`, `Quarantined`, or a fatal [`PipelineError`].

use std::fmt;

use chrono::SecondsFormat;

use crate::app::PipelineContext;
use crate::domain::artifact_name;
use crate::domain::{
    ArtifactKind, EnrichmentResult, KeySetDiagnostic, PipelineError, ProcessedArtifact,
    RawSnapshot, StoreError, ValidationOutcome, build_prompt, normalize, validate,
};
use crate::ports::{ArtifactStore, Clock, ModelInvoker};

/// Why a model reply was quarantined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarantineKind {
    /// Reply was not parseable JSON after normalization.
    Malformed,
    /// Reply parsed but violated the contract shape.
    SchemaViolation,
}

impl QuarantineKind {
    /// Label used in logs and in the quarantine object name.
    pub fn tag(self) -> &'static str {
        match self {
            QuarantineKind::Malformed => "malformed",
            QuarantineKind::SchemaViolation => "schema_violation",
        }
    }
}

impl fmt::Display for QuarantineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Terminal, non-fatal state of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Processed artifact written.
    Persisted { artifact: String, diagnostic: Option<KeySetDiagnostic> },
    /// Raw model reply written to the debug location; the data is unusable.
    Quarantined { artifact: String, kind: QuarantineKind, detail: String },
    /// Trigger named an object outside the raw prefix.
    Ignored { object: String },
}

impl RunOutcome {
    /// Whether the run produced (or deliberately skipped) usable output.
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Quarantined { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    PromptBuilt,
    Invoked,
    Normalized,
    Validated,
}

fn enter(source: &str, stage: Stage) {
    log::debug!("[{}] -> {:?}", source, stage);
}

/// Process a stored raw snapshot named by a storage trigger.
pub fn process_object<M, S, C>(
    ctx: &PipelineContext<'_, M, S, C>,
    object: &str,
) -> Result<RunOutcome, PipelineError>
where
    M: ModelInvoker,
    S: ArtifactStore,
    C: Clock,
{
    let raw_prefix = &ctx.config().storage.raw_prefix;
    if !artifact_name::is_under_prefix(raw_prefix, object) {
        log::info!("Skipping '{}': not under '{}'", object, raw_prefix);
        return Ok(RunOutcome::Ignored { object: object.to_string() });
    }

    let text = ctx.store().read_text(object).map_err(|err| PipelineError::Input {
        object: object.to_string(),
        reason: err.to_string(),
    })?;
    let snapshot = RawSnapshot::parse(&text)
        .map_err(|reason| PipelineError::Input { object: object.to_string(), reason })?;
    log::info!("Loaded raw snapshot '{}' ({} cities)", object, snapshot.len());

    process_snapshot(ctx, object, &snapshot)
}

/// Run the enrichment pipeline for one snapshot.
///
/// `source` is recorded as the artifact's `source_file`.
pub fn process_snapshot<M, S, C>(
    ctx: &PipelineContext<'_, M, S, C>,
    source: &str,
    snapshot: &RawSnapshot,
) -> Result<RunOutcome, PipelineError>
where
    M: ModelInvoker,
    S: ArtifactStore,
    C: Clock,
{
    let config = ctx.config();
    let configured = config.pipeline.city_set();
    let unconfigured: Vec<&str> =
        snapshot.cities().filter(|city| !configured.contains(*city)).collect();
    if !unconfigured.is_empty() {
        log::warn!("[{}] snapshot has unconfigured cities: {}", source, unconfigured.join(", "));
    }

    let prompt = build_prompt(snapshot, config.pipeline.strictness());
    enter(source, Stage::PromptBuilt);

    log::info!("[{}] sending prompt to {} ({} chars)", source, config.pipeline.model, prompt.len());
    let raw_text = ctx.model().invoke(&prompt).map_err(|err| {
        log::error!("[{}] model invocation failed: {}", source, err);
        PipelineError::Invocation(err)
    })?;
    enter(source, Stage::Invoked);

    let candidate = normalize(&raw_text);
    enter(source, Stage::Normalized);

    let outcome = validate(&candidate, &snapshot.city_set());
    enter(source, Stage::Validated);

    match outcome {
        ValidationOutcome::Valid { result, diagnostic } => {
            if let Some(diagnostic) = &diagnostic {
                log::warn!("[{}] key set differs from snapshot: {}", source, diagnostic);
            }
            persist(ctx, source, result, diagnostic)
        }
        ValidationOutcome::Malformed { reason, .. } => {
            quarantine(ctx, source, &raw_text, QuarantineKind::Malformed, reason)
        }
        ValidationOutcome::SchemaViolation { reason, .. } => {
            quarantine(ctx, source, &raw_text, QuarantineKind::SchemaViolation, reason)
        }
    }
}

fn persist<M, S, C>(
    ctx: &PipelineContext<'_, M, S, C>,
    source: &str,
    result: EnrichmentResult,
    diagnostic: Option<KeySetDiagnostic>,
) -> Result<RunOutcome, PipelineError>
where
    M: ModelInvoker,
    S: ArtifactStore,
    C: Clock,
{
    let config = ctx.config();
    let now = ctx.clock().now();
    let artifact = ProcessedArtifact {
        source_file: source.to_string(),
        processed_at: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        model: config.pipeline.model.clone(),
        result,
    };

    let body = serde_json::to_string_pretty(&artifact).map_err(|err| PipelineError::Sink {
        kind: ArtifactKind::Processed,
        object: config.storage.processed_prefix.clone(),
        source: StoreError::Encode(err.to_string()),
    })?;
    let object =
        artifact_name::processed_object(&config.storage.processed_prefix, now, body.as_bytes());

    write(ctx.store(), ArtifactKind::Processed, &object, &body)?;
    log::info!("[{}] processed artifact saved to {}", source, object);

    Ok(RunOutcome::Persisted { artifact: object, diagnostic })
}

fn quarantine<M, S, C>(
    ctx: &PipelineContext<'_, M, S, C>,
    source: &str,
    raw_text: &str,
    kind: QuarantineKind,
    detail: String,
) -> Result<RunOutcome, PipelineError>
where
    M: ModelInvoker,
    S: ArtifactStore,
    C: Clock,
{
    let now = ctx.clock().now();
    let object = artifact_name::quarantine_object(
        &ctx.config().storage.debug_prefix,
        now,
        kind.tag(),
        raw_text.as_bytes(),
    );

    write(ctx.store(), ArtifactKind::Quarantine, &object, raw_text)?;
    log::warn!("[{}] {} model output ({}) saved to {}", source, kind, detail, object);

    Ok(RunOutcome::Quarantined { artifact: object, kind, detail })
}

fn write<S: ArtifactStore>(
    store: &S,
    kind: ArtifactKind,
    object: &str,
    content: &str,
) -> Result<(), PipelineError> {
    store.write_new(object, content).map_err(|source| {
        log::error!("Failed to write {} artifact '{}': {}", kind, object, source);
        PipelineError::Sink { kind, object: object.to_string(), source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvocationError, PipelineConfig};
    use crate::testing::{FakeModelInvoker, MemoryArtifactStore, SteppingClock};
    use serde_json::Value;

    const PROCESSED: &str = "processed_weather_data";
    const DEBUG: &str = "debug_weather_data";

    fn snapshot(json: &str) -> RawSnapshot {
        RawSnapshot::parse(json).unwrap()
    }

    fn run(
        model: &FakeModelInvoker,
        store: &MemoryArtifactStore,
        clock: &SteppingClock,
        raw: &RawSnapshot,
    ) -> Result<RunOutcome, PipelineError> {
        let config = PipelineConfig::default();
        let ctx = PipelineContext::new(model, store, clock, &config);
        process_snapshot(&ctx, "raw_weather_data/weather-1.json", raw)
    }

    fn stored_json(store: &MemoryArtifactStore, object: &str) -> Value {
        serde_json::from_str(&store.get(object).expect("artifact should exist")).unwrap()
    }

    #[test]
    fn fenced_reply_is_persisted() {
        let model = FakeModelInvoker::replying(
            "```json\n{\"London\":{\"mood\":\"calm\",\"summary\":\"Clear skies.\"}}\n```",
        );
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let outcome =
            run(&model, &store, &clock, &snapshot(r#"{"London": {"main": {"temp": 284.1}}}"#))
                .unwrap();

        let RunOutcome::Persisted { artifact, diagnostic } = outcome else {
            panic!("expected Persisted");
        };
        assert!(diagnostic.is_none());
        assert!(artifact.starts_with("processed_weather_data/processed-20261019-142501-000000-"));

        let doc = stored_json(&store, &artifact);
        assert_eq!(doc["result"]["London"]["mood"], "calm");
        assert_eq!(doc["source_file"], "raw_weather_data/weather-1.json");
        assert_eq!(doc["model"], "gemini-2.5-flash");
        assert_eq!(doc["processed_at"], "2026-10-19T14:25:01.000000Z");
        assert!(store.names_under(DEBUG).is_empty());
    }

    #[test]
    fn exact_key_set_round_trips_into_result() {
        let model = FakeModelInvoker::replying(
            r#"{"Delhi":{"mood":"hazy","summary":"Warm and hazy."},"Sydney":{"mood":"breezy","summary":"Cool breeze off the harbour."},"Tokyo":{"mood":"humid","summary":"Sticky afternoon."}}"#,
        );
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();
        let raw = snapshot(r#"{"Delhi": {}, "Sydney": {}, "Tokyo": {}}"#);

        let outcome = run(&model, &store, &clock, &raw).unwrap();
        let RunOutcome::Persisted { artifact, .. } = outcome else {
            panic!("expected Persisted");
        };

        let doc = stored_json(&store, &artifact);
        let keys: Vec<&String> = doc["result"].as_object().unwrap().keys().collect();
        assert_eq!(keys, raw.city_set().iter().collect::<Vec<_>>());
    }

    #[test]
    fn prose_reply_is_quarantined_verbatim() {
        let model = FakeModelInvoker::replying("I cannot process this.");
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let outcome = run(&model, &store, &clock, &snapshot(r#"{"Tokyo": {}}"#)).unwrap();

        let RunOutcome::Quarantined { artifact, kind, .. } = &outcome else {
            panic!("expected Quarantined");
        };
        assert_eq!(*kind, QuarantineKind::Malformed);
        assert!(!outcome.is_success());
        assert!(
            artifact.starts_with("debug_weather_data/invalid-json-20261019-142501-000000-malformed-")
        );
        assert!(artifact.ends_with(".txt"));
        assert_eq!(store.get(artifact).as_deref(), Some("I cannot process this."));
        assert!(store.names_under(PROCESSED).is_empty());
    }

    #[test]
    fn quarantine_keeps_text_before_normalization() {
        let raw_reply = "```json\n{\"London\": {\"mood\": \"calm\"}}\n```\n";
        let model = FakeModelInvoker::replying(raw_reply);
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let outcome = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap();

        let RunOutcome::Quarantined { artifact, kind, detail } = outcome else {
            panic!("expected Quarantined");
        };
        assert_eq!(kind, QuarantineKind::SchemaViolation);
        assert!(detail.contains("missing field 'summary'"));
        assert!(artifact.starts_with(
            "debug_weather_data/invalid-json-20261019-142501-000000-schema_violation-"
        ));
        assert_eq!(store.get(&artifact).as_deref(), Some(raw_reply));
    }

    #[test]
    fn array_reply_is_schema_violation() {
        let model = FakeModelInvoker::replying("[1,2,3]");
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let outcome = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Quarantined { kind: QuarantineKind::SchemaViolation, .. }
        ));
    }

    #[test]
    fn key_set_drift_is_persisted_with_diagnostic() {
        let model =
            FakeModelInvoker::replying(r#"{"London":{"mood":"calm","summary":"Clear skies."}}"#);
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let outcome =
            run(&model, &store, &clock, &snapshot(r#"{"London": {}, "Tokyo": {}}"#)).unwrap();

        let RunOutcome::Persisted { diagnostic, .. } = outcome else {
            panic!("expected Persisted");
        };
        assert_eq!(diagnostic.unwrap().missing, vec!["Tokyo".to_string()]);
    }

    #[test]
    fn invocation_failure_writes_nothing() {
        let model = FakeModelInvoker::failing(InvocationError::Timeout(60));
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        let err = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap_err();
        assert!(matches!(err, PipelineError::Invocation(InvocationError::Timeout(60))));
        assert!(store.names().is_empty());
    }

    #[test]
    fn sink_failure_is_distinct_from_validation_failure() {
        let model =
            FakeModelInvoker::replying(r#"{"London":{"mood":"calm","summary":"Clear skies."}}"#);
        let store = MemoryArtifactStore::new().with_failing_writes();
        let clock = SteppingClock::fixed();

        let err = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap_err();
        assert!(matches!(err, PipelineError::Sink { kind: ArtifactKind::Processed, .. }));

        let model = FakeModelInvoker::replying("nope");
        let err = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap_err();
        assert!(matches!(err, PipelineError::Sink { kind: ArtifactKind::Quarantine, .. }));
    }

    #[test]
    fn prompt_sent_to_model_names_snapshot_cities() {
        let model = FakeModelInvoker::replying("{}");
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        run(&model, &store, &clock, &snapshot(r#"{"Sydney": {"wind": {"speed": 7.2}}}"#))
            .unwrap();

        let prompts = model.recorded_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Sydney"));
        assert!(prompts[0].contains("\"speed\": 7.2"));
    }

    #[test]
    fn runs_for_distinct_snapshots_never_overwrite() {
        let model = FakeModelInvoker::replying(r#"{"London":{"mood":"calm","summary":"Clear."}}"#);
        model.push_reply(r#"{"Tokyo":{"mood":"humid","summary":"Warm."}}"#);
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::ticking();

        let first = run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap();
        let second = run(&model, &store, &clock, &snapshot(r#"{"Tokyo": {}}"#)).unwrap();

        let (RunOutcome::Persisted { artifact: a, .. }, RunOutcome::Persisted { artifact: b, .. }) =
            (first, second)
        else {
            panic!("both runs should persist");
        };
        assert_ne!(a, b);
        assert_eq!(store.names_under(PROCESSED).len(), 2);
        assert_eq!(stored_json(&store, &a)["result"]["London"]["mood"], "calm");
        assert_eq!(stored_json(&store, &b)["result"]["Tokyo"]["mood"], "humid");
    }

    #[test]
    fn same_instant_runs_are_disambiguated_by_content() {
        let model = FakeModelInvoker::replying("not json");
        model.push_reply("also not json");
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();

        run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap();
        run(&model, &store, &clock, &snapshot(r#"{"London": {}}"#)).unwrap();

        assert_eq!(store.names_under(DEBUG).len(), 2);
    }

    #[test]
    fn object_outside_raw_prefix_is_ignored() {
        let model = FakeModelInvoker::default();
        let store = MemoryArtifactStore::new();
        let clock = SteppingClock::fixed();
        let config = PipelineConfig::default();
        let ctx = PipelineContext::new(&model, &store, &clock, &config);

        let outcome = process_object(&ctx, "processed_weather_data/processed-x.json").unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Ignored { object: "processed_weather_data/processed-x.json".into() }
        );
        assert!(outcome.is_success());
        assert!(model.recorded_prompts().is_empty());
    }

    #[test]
    fn stored_object_is_loaded_and_processed() {
        let model = FakeModelInvoker::replying(r#"{"Delhi":{"mood":"hazy","summary":"Haze."}}"#);
        let store = MemoryArtifactStore::new()
            .with_object("raw_weather_data/weather-1.json", r#"{"Delhi": {"name": "Delhi"}}"#);
        let clock = SteppingClock::fixed();
        let config = PipelineConfig::default();
        let ctx = PipelineContext::new(&model, &store, &clock, &config);

        let outcome = process_object(&ctx, "raw_weather_data/weather-1.json").unwrap();
        let RunOutcome::Persisted { artifact, .. } = outcome else {
            panic!("expected Persisted");
        };
        assert_eq!(stored_json(&store, &artifact)["source_file"], "raw_weather_data/weather-1.json");
    }

    #[test]
    fn unreadable_snapshot_is_input_error() {
        let model = FakeModelInvoker::default();
        let store =
            MemoryArtifactStore::new().with_object("raw_weather_data/weather-2.json", "[1, 2]");
        let clock = SteppingClock::fixed();
        let config = PipelineConfig::default();
        let ctx = PipelineContext::new(&model, &store, &clock, &config);

        let err = process_object(&ctx, "raw_weather_data/weather-2.json").unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));

        let err = process_object(&ctx, "raw_weather_data/missing.json").unwrap_err();
        assert!(matches!(err, PipelineError::Input { ref reason, .. } if reason.contains("not found")));
        assert!(model.recorded_prompts().is_empty());
    }
}
