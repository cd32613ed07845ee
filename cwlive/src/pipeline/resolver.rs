//! Sequential pipeline resolver.
//!
//! Runs bound steps one after another. Each step suspends only while its
//! data source call is in flight; the next step starts after the previous
//! response handler returned.

use super::DataSource;
use crate::context::PipelineContext;
use crate::core::StepStatus;
use crate::errors::{PipelineError, ResolverError};
use crate::events::{event_types, EventSink, NoOpEventSink, PipelineEvent};
use crate::stages::{PipelineStep, StepOutcome, StepRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Name reported for failures raised by the resolver's `before` hook.
const BEFORE_HOOK: &str = "before";

type BeforeHook = dyn Fn(&mut PipelineContext) -> Result<(), ResolverError> + Send + Sync;

/// A step paired with the data source its request goes to.
#[derive(Debug, Clone)]
struct BoundStep {
    step: Arc<dyn PipelineStep>,
    data_source: Arc<dyn DataSource>,
}

/// How one step of a run finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name.
    pub step: String,
    /// Step status.
    pub status: StepStatus,
}

/// Result of a completed resolver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// The last step's result; the value returned to the GraphQL caller.
    pub result: serde_json::Value,
    /// Per-step statuses in execution order.
    pub steps: Vec<StepRecord>,
    /// Total execution time in milliseconds.
    pub duration_ms: f64,
}

impl PipelineRun {
    /// Returns the status of a named step.
    #[must_use]
    pub fn status_of(&self, step: &str) -> Option<StepStatus> {
        self.steps.iter().find(|r| r.step == step).map(|r| r.status)
    }
}

/// A resolver made of an ordered list of steps.
pub struct PipelineResolver {
    name: String,
    steps: Vec<BoundStep>,
    before: Option<Box<BeforeHook>>,
    event_sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for PipelineResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineResolver")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .field("has_before", &self.before.is_some())
            .finish_non_exhaustive()
    }
}

impl PipelineResolver {
    /// Creates a resolver with no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            before: None,
            event_sink: Arc::new(NoOpEventSink),
        }
    }

    /// Appends a step bound to its data source.
    #[must_use]
    pub fn with_step(mut self, step: Arc<dyn PipelineStep>, data_source: Arc<dyn DataSource>) -> Self {
        self.steps.push(BoundStep { step, data_source });
        self
    }

    /// Sets the hook that runs before the first step, typically to seed the stash.
    #[must_use]
    pub fn with_before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut PipelineContext) -> Result<(), ResolverError> + Send + Sync + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Returns the resolver name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|b| b.step.name()).collect()
    }

    /// Resolves a field with the given arguments.
    pub async fn resolve(&self, arguments: serde_json::Value) -> Result<PipelineRun, PipelineError> {
        self.run(PipelineContext::new(&self.name, arguments)).await
    }

    /// Runs every step against the given context.
    ///
    /// Stops at the first request or response handler error and returns
    /// it as [`PipelineError::Aborted`]; later steps never run.
    pub async fn run(&self, mut ctx: PipelineContext) -> Result<PipelineRun, PipelineError> {
        if self.steps.is_empty() {
            return Err(PipelineError::Empty(self.name.clone()));
        }

        let start = Instant::now();
        self.emit(PipelineEvent::new(event_types::PIPELINE_STARTED, &self.name));

        if let Some(before) = &self.before {
            if let Err(error) = before(&mut ctx) {
                return Err(self.abort(BEFORE_HOOK, error));
            }
        }

        let mut records = Vec::with_capacity(self.steps.len());

        for bound in &self.steps {
            let step_name = bound.step.name();
            self.emit(PipelineEvent::new(event_types::STEP_STARTED, &self.name).with_step(step_name));

            let request = match bound.step.request(&mut ctx) {
                Ok(request) => request,
                Err(error) => return Err(self.abort(step_name, error)),
            };

            let outcome = match request {
                StepRequest::NoOp => {
                    debug!(resolver = %self.name, step = step_name, "Step returned no-op");
                    self.emit(PipelineEvent::new(event_types::STEP_SKIPPED, &self.name).with_step(step_name));
                    StepOutcome::Skipped
                }
                StepRequest::Invoke { payload } => {
                    self.emit(
                        PipelineEvent::new(event_types::STEP_INVOKED, &self.name)
                            .with_step(step_name)
                            .with_data(serde_json::json!({ "data_source": bound.data_source.name() })),
                    );
                    match bound.data_source.invoke(payload).await {
                        Ok(result) => StepOutcome::Succeeded(result),
                        Err(err) => StepOutcome::Failed(err),
                    }
                }
            };

            let status = match &outcome {
                StepOutcome::Skipped => StepStatus::Skipped,
                StepOutcome::Succeeded(_) => StepStatus::Completed,
                StepOutcome::Failed(_) => StepStatus::Recovered,
            };

            match bound.step.response(&ctx, outcome) {
                Ok(result) => {
                    ctx.set_prev_result(result);
                    records.push(StepRecord {
                        step: step_name.to_string(),
                        status,
                    });
                    self.emit(
                        PipelineEvent::new(event_types::STEP_COMPLETED, &self.name)
                            .with_step(step_name)
                            .with_data(serde_json::json!({ "status": status })),
                    );
                }
                Err(error) => return Err(self.abort(step_name, error)),
            }
        }

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(resolver = %self.name, steps = records.len(), duration_ms, "Pipeline completed");
        self.emit(
            PipelineEvent::new(event_types::PIPELINE_COMPLETED, &self.name)
                .with_data(serde_json::json!({ "duration_ms": duration_ms })),
        );

        Ok(PipelineRun {
            result: ctx.into_result().unwrap_or(serde_json::Value::Null),
            steps: records,
            duration_ms,
        })
    }

    fn abort(&self, step: &str, error: ResolverError) -> PipelineError {
        warn!(
            resolver = %self.name,
            step,
            error_type = %error.error_type,
            error = %error.message,
            "Pipeline aborted"
        );
        self.emit(
            PipelineEvent::new(event_types::PIPELINE_ABORTED, &self.name)
                .with_step(step)
                .with_data(serde_json::json!(error.to_dict())),
        );
        PipelineError::Aborted {
            step: step.to_string(),
            error,
        }
    }

    fn emit(&self, event: PipelineEvent) {
        self.event_sink.emit(&event);
    }
}
