use std::time::Duration;

use async_trait::async_trait;
use crate::errors::ScanVaultError;

/// A single read-only retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub timeout: Duration,
}

/// What came back from the remote host. `body` is only populated for
/// success statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to perform one retrieval. The production implementation is
/// [`super::http::HttpTransport`]; tests substitute scripted doubles.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport-level failures (connect, timeout, body read) are errors.
    /// Any HTTP status, including error statuses, is a response.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, ScanVaultError>;
}
