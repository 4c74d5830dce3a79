//! Object-store interface and its S3 implementation.
//!
//! The trait is the seam between the upload orchestration and the wire:
//! production code talks to S3, tests talk to the generated mock
//! (exported through the `test-export-mocks` feature so integration
//! tests can drive the orchestrator without a network).

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::config::UploadRequest;
use crate::object::ObjectDestination;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// A destination that accepts one whole object per call. Implementors
/// must send the entire body as a single request with the given
/// content length and content type; no chunking, no retries.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        destination: ObjectDestination,
        body: Vec<u8>,
        content_length: i64,
        content_type: String,
    ) -> Result<(), StoreError>;
}

/// S3 client configured from the static credentials in the request.
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Builds the client for the request's region and credentials. SDK
    /// retries are turned off: the contract is exactly one PUT attempt
    /// per run. Construction performs no network I/O.
    pub async fn connect(request: &UploadRequest) -> Self {
        let credentials = Credentials::new(
            request.access_key.clone(),
            request.secret_key.clone(),
            request.session_token.clone(),
            None,
            "static",
        );
        let mut loader = aws_config::from_env()
            .region(Region::new(request.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());
        if let Some(endpoint) = &request.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared_config = loader.load().await;

        // Path-style addressing for S3-compatible endpoints (MinIO etc).
        let client = if request.endpoint.is_some() {
            let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&shared_config)
        };

        S3ObjectStore { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        destination: ObjectDestination,
        body: Vec<u8>,
        content_length: i64,
        content_type: String,
    ) -> Result<(), StoreError> {
        let result = self
            .client
            .put_object()
            .bucket(destination.bucket)
            .key(destination.key)
            .body(ByteStream::from(body))
            .content_length(content_length)
            .content_type(content_type)
            .send()
            .await;

        if let Err(err) = result {
            // Keep the full SDK error chain; the operator sees it verbatim.
            let detail = format!("{}", DisplayErrorContext(&err));
            return Err(detail.into());
        }
        Ok(())
    }
}
