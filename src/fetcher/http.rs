use async_trait::async_trait;
use reqwest::Client;
use crate::errors::ScanVaultError;
use super::transport::{FetchRequest, FetchResponse, Transport};
use tracing::debug;

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ScanVaultError> {
        let client = Client::builder()
            .user_agent(concat!("scanvault/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanVaultError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn classify(e: reqwest::Error, url: &str) -> ScanVaultError {
    if e.is_timeout() {
        ScanVaultError::Timeout(format!("GET {} timed out: {}", url, e))
    } else {
        ScanVaultError::Network(format!("GET {} failed: {}", url, e))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, ScanVaultError> {
        let resp = self.client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| classify(e, &request.url))?;

        let status = resp.status();
        debug!(url = %request.url, status = status.as_u16(), "Artifact response");
        if !status.is_success() {
            return Ok(FetchResponse { status: status.as_u16(), body: Vec::new() });
        }

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                classify(e, &request.url)
            } else {
                ScanVaultError::BodyRead(format!("{}: {}", request.url, e))
            }
        })?;

        Ok(FetchResponse { status: status.as_u16(), body: body.to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::time::Duration;

    async fn spawn_host() -> String {
        let app = Router::new()
            .route("/acme/ok.json", get(|| async { r#"[{"scanResults":{"scan_id":"S1"}}]"# }))
            .route("/acme/missing.json", get(|| async { (StatusCode::NOT_FOUND, "not found") }))
            .route("/acme/slow.json", get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "[]"
            }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(url: String, timeout: Duration) -> FetchRequest {
        FetchRequest { url, timeout }
    }

    #[tokio::test]
    async fn test_http_transport_success_reads_body() {
        let base = spawn_host().await;
        let transport = HttpTransport::new().unwrap();
        let resp = transport
            .fetch(request(format!("{}/acme/ok.json", base), Duration::from_secs(10)))
            .await
            .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, br#"[{"scanResults":{"scan_id":"S1"}}]"#.to_vec());
    }

    #[tokio::test]
    async fn test_http_transport_error_status_is_response() {
        let base = spawn_host().await;
        let transport = HttpTransport::new().unwrap();
        let resp = transport
            .fetch(request(format!("{}/acme/missing.json", base), Duration::from_secs(10)))
            .await
            .unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert!(resp.body.is_empty());
    }

    #[tokio::test]
    async fn test_http_transport_timeout() {
        let base = spawn_host().await;
        let transport = HttpTransport::new().unwrap();
        let err = transport
            .fetch(request(format!("{}/acme/slow.json", base), Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanVaultError::Timeout(_)), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new().unwrap();
        let err = transport
            .fetch(request(format!("http://{}/a.json", addr), Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
