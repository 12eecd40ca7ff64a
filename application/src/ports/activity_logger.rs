//! Port for structured activity logging.
//!
//! Defines the [`ActivityLogger`] trait for recording what happened to
//! generations (created by the scheduler or a submission, finalized,
//! rejected) in a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures an audit
//! trail of promotion decisions (JSONL).

use genpool_domain::{Generation, Verdict};
use serde_json::{Value, json};

/// A structured activity event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    /// Event type identifier (e.g., "generation_finalized").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ActivityEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// The demand scheduler added a generation to the evaluating pool
    pub fn created(generation: &Generation, prompt: &str) -> Self {
        Self::new(
            "generation_created",
            json!({
                "id": generation.id(),
                "title": generation.subject(),
                "type": generation.category(),
                "source": "scheduler",
                "prompt": prompt,
                "chars": generation.text().chars().count(),
            }),
        )
    }

    /// A rating submission introduced a generation the store did not know
    pub fn submitted(generation: &Generation) -> Self {
        Self::new(
            "generation_created",
            json!({
                "id": generation.id(),
                "title": generation.subject(),
                "type": generation.category(),
                "source": "submission",
                "submitter_id": generation.submitter_id(),
                "chars": generation.text().chars().count(),
            }),
        )
    }

    /// Consensus moved a generation to the finalized pool
    pub fn finalized(generation: &Generation, verdict: &Verdict) -> Self {
        Self::new("generation_finalized", Self::decision_payload(generation, verdict))
    }

    /// Consensus discarded a generation
    pub fn rejected(generation: &Generation, verdict: &Verdict) -> Self {
        Self::new("generation_rejected", Self::decision_payload(generation, verdict))
    }

    fn decision_payload(generation: &Generation, verdict: &Verdict) -> Value {
        json!({
            "id": generation.id(),
            "title": generation.subject(),
            "type": generation.category(),
            "raters": verdict.raters,
            "leaders": verdict.leaders,
            "tally": verdict.tally,
        })
    }
}

/// Port for logging activity events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures never
/// affect rating submissions or the scheduler.
pub trait ActivityLogger: Send + Sync {
    fn log(&self, event: ActivityEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoActivityLogger;

impl ActivityLogger for NoActivityLogger {
    fn log(&self, _event: ActivityEvent) {}
}
