//! Stack deployment management.

use crate::errors::DeployError;
use crate::stack::StackType;
use async_trait::async_trait;
use cwlive::retry::{should_retry, RetryConfig, RetryDecision, RetryState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Options shared by every stack operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentOptions {
    /// Deployment stage (e.g. `dev`).
    pub stage: String,
    /// AWS region.
    pub region: String,
}

impl DeploymentOptions {
    /// Creates options for a stage and region.
    #[must_use]
    pub fn new(stage: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            region: region.into(),
        }
    }
}

/// Creates and removes CloudFormation stacks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentManager: Send + Sync {
    /// Prepares AWS clients. Must be called before any other operation.
    async fn initialize_aws(&self) -> Result<(), DeployError>;

    /// Removes every stack of the stage, dependents first.
    async fn remove_all_stacks(&self, options: &DeploymentOptions) -> Result<(), DeployError>;

    /// Removes one stack of the stage.
    async fn remove_stack(&self, stack: StackType, options: &DeploymentOptions) -> Result<(), DeployError>;
}

/// Where a stack is in its deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionState {
    /// The stack is gone.
    Deleted,
    /// Deletion is still running; carries the current status.
    InProgress(String),
    /// CloudFormation gave up; carries the status reason.
    Failed(String),
}

/// Maps a described stack status to a deletion state.
///
/// `None` means the stack no longer exists.
#[must_use]
pub fn deletion_state(status: Option<&str>, reason: Option<&str>) -> DeletionState {
    match status {
        None | Some("DELETE_COMPLETE") => DeletionState::Deleted,
        Some("DELETE_FAILED") => DeletionState::Failed(reason.unwrap_or("no reason reported").to_string()),
        Some(other) => DeletionState::InProgress(other.to_string()),
    }
}

/// Default number of status checks while waiting for deletion.
pub const DEFAULT_DELETE_POLL_ATTEMPTS: usize = 120;

/// Default delay between status checks.
pub const DEFAULT_DELETE_POLL_DELAY: Duration = Duration::from_secs(5);

/// Status of a described stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackDescription {
    /// CloudFormation stack status (e.g. `DELETE_IN_PROGRESS`).
    pub status: String,
    /// Status reason, if CloudFormation reported one.
    pub reason: Option<String>,
}

impl StackDescription {
    /// Creates a description with no reason.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: None,
        }
    }

    /// Sets the status reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Stack calls the deployment manager needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StackApi: Send + Sync + std::fmt::Debug {
    /// Starts deleting a stack.
    async fn delete_stack(&self, stack_name: &str) -> Result<(), DeployError>;

    /// Describes a stack. `None` means it does not exist.
    async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>, DeployError>;
}

pub use cfn::CloudFormationStackApi;

mod cfn {
    use super::{StackApi, StackDescription};
    use crate::errors::DeployError;
    use async_trait::async_trait;
    use aws_config::{BehaviorVersion, Region};
    use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
    use aws_sdk_cloudformation::Client;

    /// [`StackApi`] backed by AWS CloudFormation.
    #[derive(Debug, Clone)]
    pub struct CloudFormationStackApi {
        client: Client,
    }

    impl CloudFormationStackApi {
        /// Wraps an existing client.
        #[must_use]
        pub fn new(client: Client) -> Self {
            Self { client }
        }

        /// Builds a client for `region` from the default credential chain.
        pub async fn for_region(region: &str) -> Self {
            let config = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load()
                .await;
            Self::new(Client::new(&config))
        }
    }

    /// CloudFormation reports an unknown stack as a `ValidationError`.
    pub(super) fn is_missing_stack(code: Option<&str>, message: Option<&str>) -> bool {
        code == Some("ValidationError") && message.is_some_and(|m| m.contains("does not exist"))
    }

    #[async_trait]
    impl StackApi for CloudFormationStackApi {
        async fn delete_stack(&self, stack_name: &str) -> Result<(), DeployError> {
            self.client
                .delete_stack()
                .stack_name(stack_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|e| DeployError::Aws {
                    stack: stack_name.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })
        }

        async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>, DeployError> {
            match self.client.describe_stacks().stack_name(stack_name).send().await {
                Ok(output) => Ok(output.stacks().first().and_then(|stack| {
                    stack.stack_status().map(|status| StackDescription {
                        status: status.as_str().to_string(),
                        reason: stack.stack_status_reason().map(str::to_string),
                    })
                })),
                Err(e) => {
                    let service = e.as_service_error();
                    if is_missing_stack(
                        service.and_then(ProvideErrorMetadata::code),
                        service.and_then(ProvideErrorMetadata::message),
                    ) {
                        Ok(None)
                    } else {
                        Err(DeployError::Aws {
                            stack: stack_name.to_string(),
                            message: DisplayErrorContext(&e).to_string(),
                        })
                    }
                }
            }
        }
    }
}

/// [`DeploymentManager`] backed by AWS CloudFormation.
#[derive(Debug)]
pub struct CloudFormationDeploymentManager {
    region: String,
    stack_prefix: String,
    poll: RetryConfig,
    api: tokio::sync::OnceCell<Arc<dyn StackApi>>,
}

impl CloudFormationDeploymentManager {
    /// Creates a manager for a region and stack name prefix.
    #[must_use]
    pub fn new(region: impl Into<String>, stack_prefix: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            stack_prefix: stack_prefix.into(),
            poll: RetryConfig::fixed(DEFAULT_DELETE_POLL_ATTEMPTS, DEFAULT_DELETE_POLL_DELAY),
            api: tokio::sync::OnceCell::new(),
        }
    }

    /// Uses `api` instead of building a CloudFormation client on initialization.
    #[must_use]
    pub fn with_stack_api(mut self, api: Arc<dyn StackApi>) -> Self {
        self.api = tokio::sync::OnceCell::from(api);
        self
    }

    /// Sets the deletion polling bound.
    #[must_use]
    pub fn with_poll(mut self, attempts: usize, delay: Duration) -> Self {
        self.poll = RetryConfig::fixed(attempts, delay);
        self
    }

    fn api(&self) -> Result<&dyn StackApi, DeployError> {
        self.api.get().map(|api| api.as_ref()).ok_or(DeployError::NotInitialized)
    }

    async fn describe(&self, stack_name: &str) -> Result<DeletionState, DeployError> {
        let description = self.api()?.describe_stack(stack_name).await?;
        Ok(deletion_state(
            description.as_ref().map(|d| d.status.as_str()),
            description.as_ref().and_then(|d| d.reason.as_deref()),
        ))
    }

    async fn delete_and_wait(&self, stack_name: &str) -> Result<(), DeployError> {
        info!(stack = stack_name, "Deleting stack");
        self.api()?.delete_stack(stack_name).await?;

        let mut state = RetryState::new();
        loop {
            match self.describe(stack_name).await? {
                DeletionState::Deleted => {
                    info!(stack = stack_name, "Stack deleted");
                    return Ok(());
                }
                DeletionState::Failed(reason) => {
                    return Err(DeployError::DeleteFailed {
                        stack: stack_name.to_string(),
                        reason,
                    });
                }
                DeletionState::InProgress(status) => match should_retry(&mut state, &self.poll) {
                    RetryDecision::Retry(delay) => {
                        debug!(stack = stack_name, status = %status, attempt = state.attempt, "Waiting for stack deletion");
                        tokio::time::sleep(delay).await;
                    }
                    RetryDecision::GiveUp => {
                        return Err(DeployError::Timeout {
                            stack: stack_name.to_string(),
                            status,
                        });
                    }
                },
            }
        }
    }
}

#[async_trait]
impl DeploymentManager for CloudFormationDeploymentManager {
    async fn initialize_aws(&self) -> Result<(), DeployError> {
        self.api
            .get_or_init(|| async {
                Arc::new(CloudFormationStackApi::for_region(&self.region).await) as Arc<dyn StackApi>
            })
            .await;
        debug!(region = %self.region, "AWS clients initialized");
        Ok(())
    }

    async fn remove_all_stacks(&self, options: &DeploymentOptions) -> Result<(), DeployError> {
        for stack in StackType::REMOVAL_ORDER {
            self.remove_stack(stack, options).await?;
        }
        Ok(())
    }

    async fn remove_stack(&self, stack: StackType, options: &DeploymentOptions) -> Result<(), DeployError> {
        let name = stack.stack_name(&self.stack_prefix, &options.stage);
        debug!(stack = %stack, name = %name, region = %options.region, "Removing stack");
        self.delete_and_wait(&name).await
    }
}
