//! Event sinks for pipeline observability.
//!
//! A resolver reports every step transition to the sink it was built
//! with. There is no global sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent};

/// Event types emitted by the pipeline resolver.
pub mod event_types {
    /// A resolver run started.
    pub const PIPELINE_STARTED: &str = "pipeline.started";
    /// A resolver run finished with a result.
    pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
    /// A resolver run stopped at a failing step.
    pub const PIPELINE_ABORTED: &str = "pipeline.aborted";
    /// A step's request handler is about to run.
    pub const STEP_STARTED: &str = "step.started";
    /// A step's data source was invoked.
    pub const STEP_INVOKED: &str = "step.invoked";
    /// A step returned `no-op`.
    pub const STEP_SKIPPED: &str = "step.skipped";
    /// A step's response handler returned a result.
    pub const STEP_COMPLETED: &str = "step.completed";
}
