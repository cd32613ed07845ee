//! Pipeline resolver execution.
//!
//! This module provides:
//! - Data sources invoked between a step's request and response handlers
//! - The sequential resolver that runs bound steps in a fixed order
//! - The `createCWLUser` resolver wiring

mod create_user;
mod data_source;
#[cfg(test)]
mod integration_tests;
mod resolver;

pub use create_user::{
    create_user_resolver, seed_create_user_stash, CreateUserDataSources, CREATE_CWL_USER_RESOLVER,
};
pub use data_source::{DataSource, FnDataSource, NoneDataSource};
pub use resolver::{PipelineResolver, PipelineRun, StepRecord};
