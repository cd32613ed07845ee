//! Testing utilities for CloudWatch Live resolvers and API wrappers.
//!
//! This module provides:
//! - Recording data sources and a scripted GraphQL transport
//! - Fixtures for `createCWLUser` scenarios
//! - Assertions for pipeline runs

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_aborted_with, assert_step_status};
pub use fixtures::{
    cognito_user_record, create_user_arguments, passthrough_persist_step, user_input,
    CreateUserFixture,
};
pub use mocks::{RecordingDataSource, RecordingInvalidator, ScriptedTransport};
