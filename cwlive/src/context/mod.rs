//! Context management for pipeline execution.
//!
//! This module provides:
//! - The stash, a scratch space shared by the steps of one run
//! - The pipeline context holding the arguments, the stash and the
//!   previous step's result

mod execution;
mod stash;

pub use execution::PipelineContext;
pub use stash::Stash;
