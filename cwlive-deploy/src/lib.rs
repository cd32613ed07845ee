//! # CloudWatch Live deployment tooling
//!
//! Stack removal and bucket provisioning for CloudWatch Live.
//!
//! - [`removal`]: resolve what to remove from flags or a wizard, then dispatch
//! - [`manager`]: the deployment manager seam and its CloudFormation implementation
//! - [`bucket`]: idempotent bucket creation with bounded availability polling

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod bucket;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod manager;
pub mod removal;
pub mod stack;

pub use bucket::{BucketEnsurer, BucketStatus, BucketStore, S3BucketStore};
pub use config::DeployConfig;
pub use errors::{BucketError, DeployError, RemovalError, StorageError, StorageErrorKind};
pub use manager::{
    CloudFormationDeploymentManager, CloudFormationStackApi, DeploymentManager, DeploymentOptions, StackApi,
};
pub use stack::StackType;
