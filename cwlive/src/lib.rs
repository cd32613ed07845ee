//! # CloudWatch Live
//!
//! Core of the CloudWatch Live CRUD application.
//!
//! The crate provides:
//!
//! - **Pipeline resolvers**: ordered steps around data source calls, sharing a per-run stash
//! - **User creation**: Cognito provisioning, persistence and a conditional welcome email
//! - **API client layer**: typed GraphQL wrappers that turn `errors` into domain errors
//! - **Event-driven observability**: every step transition is reported to an event sink
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cwlive::prelude::*;
//!
//! let resolver = create_user_resolver(persist_step, CreateUserDataSources {
//!     cognito,
//!     persist,
//!     welcome_email,
//! });
//!
//! let run = resolver.resolve(arguments).await?;
//! println!("{}", run.result);
//! ```

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

pub mod api;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod retry;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api::{
        create_cwl_user, get_cwl_user, list_organizations, GraphQlRequest, GraphQlResponse,
        GraphQlTransport,
    };
    pub use crate::config::{ApiConfig, EnvSource, StdEnvSource};
    pub use crate::context::{PipelineContext, Stash};
    pub use crate::core::{CwlUser, CwlUserInput, Organization, StepStatus, UserResult};
    pub use crate::errors::{
        ApiError, CwlError, InvocationError, InvocationErrorKind, PipelineError, ResolverError,
        TransportError, ValidationError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{
        create_user_resolver, CreateUserDataSources, DataSource, FnDataSource, PipelineResolver,
        PipelineRun,
    };
    pub use crate::retry::{with_retry, RetryConfig};
    pub use crate::stages::{FnStep, PipelineStep, StepOutcome, StepRequest};
    pub use crate::utils::{iso_timestamp, Timestamp};
}
