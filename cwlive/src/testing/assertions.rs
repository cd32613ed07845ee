//! Test assertions for pipeline runs.

use crate::core::StepStatus;
use crate::errors::{PipelineError, ResolverError};
use crate::pipeline::PipelineRun;

/// Asserts that a step finished with the expected status.
pub fn assert_step_status(run: &PipelineRun, step: &str, expected: StepStatus) {
    assert_eq!(
        run.status_of(step),
        Some(expected),
        "Expected step '{step}' to be {expected}, steps: {:?}",
        run.steps
    );
}

/// Asserts that the run aborted at `step` with the given error type.
///
/// Returns the resolver error for further checks.
pub fn assert_aborted_with(
    result: Result<PipelineRun, PipelineError>,
    step: &str,
    error_type: &str,
) -> ResolverError {
    match result {
        Err(PipelineError::Aborted { step: aborted, error }) => {
            assert_eq!(aborted, step, "Expected abort at '{step}', got '{aborted}'");
            assert!(
                error.is_type(error_type),
                "Expected error type {error_type}, got {}",
                error.error_type
            );
            error
        }
        Err(other) => panic!("Expected abort at '{step}', got error: {other}"),
        Ok(run) => panic!("Expected abort at '{step}', run completed: {:?}", run.steps),
    }
}
