use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanVaultError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Remote host returned status {status} for {url}")]
    RemoteStatus { status: u16, url: String },

    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Scan incomplete: {completed} of {total} files ingested")]
    ScanIncomplete { completed: usize, total: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}
