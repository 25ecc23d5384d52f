use super::types::ScanVaultError;

impl ScanVaultError {
    /// Stable label for this error, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            ScanVaultError::Config(_) => "ConfigError",
            ScanVaultError::Network(_) => "NetworkError",
            ScanVaultError::Timeout(_) => "TimeoutError",
            ScanVaultError::RemoteStatus { .. } => "RemoteStatusError",
            ScanVaultError::BodyRead(_) => "BodyReadError",
            ScanVaultError::InvalidArtifact(_) => "InvalidArtifactError",
            ScanVaultError::InvalidRequest(_) => "InvalidRequestError",
            ScanVaultError::Json(_) => "JsonError",
            ScanVaultError::Yaml(_) => "YamlError",
            ScanVaultError::Io(_) => "IoError",
            ScanVaultError::Database(_) => "DatabaseError",
            ScanVaultError::ScanIncomplete { .. } => "ScanIncompleteError",
            ScanVaultError::Internal(_) => "InternalError",
        }
    }

    /// Whether a per-file failure came from retrieving the artifact rather than
    /// decoding or persisting it.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScanVaultError::Network(_)
                | ScanVaultError::Timeout(_)
                | ScanVaultError::RemoteStatus { .. }
                | ScanVaultError::BodyRead(_)
        )
    }
}
