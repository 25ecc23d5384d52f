pub mod http;
pub mod transport;

pub use http::HttpTransport;
pub use transport::{FetchRequest, FetchResponse, Transport};

use std::sync::Arc;
use std::time::Duration;
use crate::config::FetcherConfig;
use crate::errors::ScanVaultError;
use reqwest::Url;
use tracing::debug;

/// Template placeholders as they appear in a parsed URL path.
pub(crate) const REPO_PLACEHOLDER: &str = "%7Brepo%7D";
pub(crate) const FILE_PLACEHOLDER: &str = "%7Bfile%7D";

/// Resolves artifact names to remote addresses and retrieves them through a
/// [`Transport`].
pub struct ArtifactFetcher {
    transport: Arc<dyn Transport>,
    url_template: String,
    timeout: Duration,
}

impl ArtifactFetcher {
    pub fn new(transport: Arc<dyn Transport>, config: &FetcherConfig) -> Self {
        Self {
            transport,
            url_template: config.url_template.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Address of `file_name` within `repository`, from the configured template.
    ///
    /// Both placeholders are filled in one pass over the template path, so a
    /// name that itself contains `{file}` is never expanded again. Characters
    /// that would end the path (`?`, `#`) are percent-encoded.
    pub fn artifact_url(&self, repository: &str, file_name: &str) -> Result<Url, ScanVaultError> {
        let mut url = Url::parse(&self.url_template)
            .map_err(|e| ScanVaultError::Config(format!("Invalid url_template: {}", e)))?;
        let path = fill_placeholders(
            url.path(),
            &[(REPO_PLACEHOLDER, repository), (FILE_PLACEHOLDER, file_name)],
        );
        url.set_path(&path);
        Ok(url)
    }

    /// Retrieve the raw artifact bytes. Transport failures and non-success
    /// statuses both come back as errors.
    pub async fn fetch(&self, file_name: &str, repository: &str) -> Result<Vec<u8>, ScanVaultError> {
        let url = self.artifact_url(repository, file_name)?.to_string();
        debug!(url = %url, "Fetching artifact");

        let response = self.transport
            .fetch(FetchRequest { url: url.clone(), timeout: self.timeout })
            .await?;

        if !response.is_success() {
            return Err(ScanVaultError::RemoteStatus { status: response.status, url });
        }
        Ok(response.body)
    }
}

/// Replace each placeholder with its value, scanning `template` once.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((at, token, value)) = values
        .iter()
        .filter_map(|(token, value)| rest.find(token).map(|at| (at, *token, *value)))
        .min_by_key(|(at, _, _)| *at)
    {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + token.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recording {
        status: u16,
        seen: Mutex<Vec<FetchRequest>>,
    }

    #[async_trait]
    impl Transport for Recording {
        async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, ScanVaultError> {
            self.seen.lock().unwrap().push(request);
            Ok(FetchResponse { status: self.status, body: b"[]".to_vec() })
        }
    }

    fn fetcher_with(status: u16) -> (Arc<Recording>, ArtifactFetcher) {
        let transport = Arc::new(Recording { status, seen: Mutex::new(Vec::new()) });
        let fetcher = ArtifactFetcher::new(transport.clone(), &FetcherConfig::default());
        (transport, fetcher)
    }

    #[test]
    fn test_artifact_url_default_template() {
        let (_, fetcher) = fetcher_with(200);
        assert_eq!(
            fetcher.artifact_url("velancio", "vulnscan1011.json").unwrap().as_str(),
            "https://raw.githubusercontent.com/velancio/vulnerability_scans/refs/heads/main/vulnscan1011.json"
        );
    }

    #[test]
    fn test_artifact_url_custom_template() {
        let transport = Arc::new(Recording { status: 200, seen: Mutex::new(Vec::new()) });
        let config = FetcherConfig {
            url_template: "http://127.0.0.1:9000/{repo}/scans/{file}".to_string(),
            timeout_secs: 3,
        };
        let fetcher = ArtifactFetcher::new(transport, &config);
        assert_eq!(
            fetcher.artifact_url("acme", "a.json").unwrap().as_str(),
            "http://127.0.0.1:9000/acme/scans/a.json"
        );
    }

    #[test]
    fn test_artifact_url_placeholder_in_name_not_expanded() {
        let (_, fetcher) = fetcher_with(200);
        let url = fetcher.artifact_url("{file}", "a.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/%7Bfile%7D/vulnerability_scans/refs/heads/main/a.json"
        );
    }

    #[test]
    fn test_artifact_url_encodes_query_and_fragment_chars() {
        let (_, fetcher) = fetcher_with(200);
        let url = fetcher.artifact_url("acme", "scan#1?.json").unwrap();
        assert!(url.as_str().ends_with("/main/scan%231%3F.json"));
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_fill_placeholders_single_pass() {
        let filled = fill_placeholders("/a/{x}/{y}", &[("{x}", "{y}"), ("{y}", "z")]);
        assert_eq!(filled, "/a/{y}/z");
    }

    #[tokio::test]
    async fn test_fetch_passes_fixed_timeout() {
        let (transport, fetcher) = fetcher_with(200);
        let body = fetcher.fetch("a.json", "acme").await.unwrap();
        assert_eq!(body, b"[]".to_vec());

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].timeout, Duration::from_secs(10));
        assert!(seen[0].url.ends_with("/acme/vulnerability_scans/refs/heads/main/a.json"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let (_, fetcher) = fetcher_with(500);
        let err = fetcher.fetch("a.json", "acme").await.unwrap_err();
        match err {
            ScanVaultError::RemoteStatus { status, url } => {
                assert_eq!(status, 500);
                assert!(url.contains("acme"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
