//! Idempotent bucket provisioning.

use crate::errors::{BucketError, StorageError, StorageErrorKind};
use async_trait::async_trait;
use cwlive::retry::{with_retry, RetryConfig};
use std::time::Duration;
use tracing::{debug, error, info};

/// Region where S3 rejects an explicit location constraint.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

/// Probes made after creation before giving up.
pub const DEFAULT_POLL_ATTEMPTS: usize = 5;

/// Delay between post-creation probes.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(2);

/// Object storage operations needed to ensure a bucket exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Succeeds if the bucket exists and is accessible.
    async fn head_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Creates the bucket, with a location constraint when given.
    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<String>,
    ) -> Result<(), StorageError>;
}

/// Returns the location constraint to send when creating in `region`.
#[must_use]
pub fn location_constraint(region: &str) -> Option<String> {
    (region != DEFAULT_S3_REGION).then(|| region.to_string())
}

/// What [`BucketEnsurer::ensure`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket was already there.
    Existing,
    /// The bucket was created and is now visible.
    Created,
}

/// Guarantees a bucket exists, creating it if necessary.
#[derive(Debug)]
pub struct BucketEnsurer<S> {
    store: S,
    poll: RetryConfig,
}

impl<S: BucketStore> BucketEnsurer<S> {
    /// Creates an ensurer with the default polling bound.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            poll: RetryConfig::fixed(DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_DELAY),
        }
    }

    /// Sets the post-creation polling bound.
    #[must_use]
    pub fn with_poll(mut self, attempts: usize, delay: Duration) -> Self {
        self.poll = RetryConfig::fixed(attempts, delay);
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensures `bucket` exists in `region`.
    ///
    /// An existing bucket costs one probe. Probe errors other than
    /// not-found are returned unchanged; no creation is attempted.
    pub async fn ensure(&self, bucket: &str, region: &str) -> Result<BucketStatus, BucketError> {
        debug!(bucket, "Checking if bucket exists");
        match self.store.head_bucket(bucket).await {
            Ok(()) => {
                debug!(bucket, "Bucket already exists");
                return Ok(BucketStatus::Existing);
            }
            Err(e) if e.kind == StorageErrorKind::NotFound => {}
            Err(e) => {
                error!(bucket, error = %e, "Error checking bucket");
                return Err(BucketError::Probe {
                    bucket: bucket.to_string(),
                    source: e,
                });
            }
        }

        info!(bucket, region, "Creating bucket");
        if let Err(e) = self.store.create_bucket(bucket, location_constraint(region)).await {
            error!(bucket, error = %e, "Failed to create bucket");
            return Err(BucketError::Create {
                bucket: bucket.to_string(),
                source: e,
            });
        }

        with_retry(
            &self.poll,
            || self.store.head_bucket(bucket),
            |attempt, _| info!(bucket, attempt, "Waiting for bucket to become available..."),
        )
        .await
        .map_err(|last| {
            error!(bucket, attempts = self.poll.max_attempts, "Bucket was created but is not yet available after multiple retries");
            BucketError::PollTimeout {
                bucket: bucket.to_string(),
                attempts: self.poll.max_attempts,
                last,
            }
        })?;

        info!(bucket, "Bucket successfully created and is available");
        Ok(BucketStatus::Created)
    }
}

pub use s3::S3BucketStore;

mod s3 {
    use super::BucketStore;
    use crate::errors::{StorageError, StorageErrorKind};
    use async_trait::async_trait;
    use aws_config::{BehaviorVersion, Region};
    use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
    use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
    use aws_sdk_s3::Client;

    /// [`BucketStore`] backed by Amazon S3.
    #[derive(Debug, Clone)]
    pub struct S3BucketStore {
        client: Client,
    }

    impl S3BucketStore {
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

    /// Maps an S3 error code to a storage error kind.
    pub(super) fn classify(code: Option<&str>, not_found: bool) -> StorageErrorKind {
        if not_found || matches!(code, Some("NotFound" | "NoSuchBucket")) {
            StorageErrorKind::NotFound
        } else {
            StorageErrorKind::Other
        }
    }

    #[async_trait]
    impl BucketStore for S3BucketStore {
        async fn head_bucket(&self, bucket: &str) -> Result<(), StorageError> {
            self.client
                .head_bucket()
                .bucket(bucket)
                .send()
                .await
                .map(|_| ())
                .map_err(|e| {
                    let service = e.as_service_error();
                    let kind = classify(
                        service.and_then(ProvideErrorMetadata::code),
                        service.is_some_and(aws_sdk_s3::operation::head_bucket::HeadBucketError::is_not_found),
                    );
                    StorageError {
                        kind,
                        message: DisplayErrorContext(&e).to_string(),
                    }
                })
        }

        async fn create_bucket(
            &self,
            bucket: &str,
            location_constraint: Option<String>,
        ) -> Result<(), StorageError> {
            let mut request = self.client.create_bucket().bucket(bucket);
            if let Some(constraint) = location_constraint {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(constraint.as_str()))
                        .build(),
                );
            }

            request.send().await.map(|_| ()).map_err(|e| {
                let service = e.as_service_error();
                StorageError {
                    kind: classify(service.and_then(ProvideErrorMetadata::code), false),
                    message: DisplayErrorContext(&e).to_string(),
                }
            })
        }
    }
}
