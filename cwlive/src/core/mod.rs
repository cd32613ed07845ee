//! Core domain model types for CloudWatch Live.
//!
//! This module contains the records exchanged with the GraphQL API and
//! the pipeline data sources, plus the per-step status reported by a
//! pipeline run.

mod organization;
mod status;
mod user;

pub use organization::Organization;
pub use status::StepStatus;
pub use user::{CreateCwlUserMutation, CwlUser, CwlUserInput, UserResult};
