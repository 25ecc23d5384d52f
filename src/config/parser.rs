use std::path::Path;
use crate::errors::ScanVaultError;
use crate::fetcher::{FILE_PLACEHOLDER, REPO_PLACEHOLDER};
use super::types::ScanVaultConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{info, warn};

pub async fn parse_config(path: &Path) -> Result<ScanVaultConfig, ScanVaultError> {
    if !path.exists() {
        return Err(ScanVaultError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ScanVaultError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: ScanVaultConfig = serde_yaml::from_value(yaml)?;

    validate_values(&config)?;

    Ok(config)
}

/// Load the config at `path`, or fall back to defaults when no path is given.
pub async fn load_config(path: Option<&str>) -> Result<ScanVaultConfig, ScanVaultError> {
    match path {
        Some(p) => {
            let config = parse_config(Path::new(p)).await?;
            info!(path = p, "Loaded configuration");
            Ok(config)
        }
        None => Ok(ScanVaultConfig::default()),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ScanVaultError> {
    // Convert YAML value to JSON for schema validation
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| ScanVaultError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ScanVaultError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; hard limits are enforced by validate_values
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values the service cannot run with.
pub fn validate_values(config: &ScanVaultConfig) -> Result<(), ScanVaultError> {
    if config.server.host.trim().is_empty() {
        return Err(ScanVaultError::Config("server.host must not be empty".into()));
    }
    if config.database.path.trim().is_empty() {
        return Err(ScanVaultError::Config("database.path must not be empty".into()));
    }
    if config.fetcher.timeout_secs == 0 {
        return Err(ScanVaultError::Config("fetcher.timeout_secs must be at least 1".into()));
    }
    let template = reqwest::Url::parse(&config.fetcher.url_template)
        .map_err(|e| ScanVaultError::Config(format!("fetcher.url_template is not a URL: {}", e)))?;
    for (placeholder, encoded) in [("{repo}", REPO_PLACEHOLDER), ("{file}", FILE_PLACEHOLDER)] {
        if !template.path().contains(encoded) {
            return Err(ScanVaultError::Config(format!(
                "fetcher.url_template must contain {} in its path",
                placeholder
            )));
        }
    }
    if config.scan.max_rounds == 0 {
        return Err(ScanVaultError::Config("scan.max_rounds must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_parse_config_full() {
        let file = write_config(
            "server:\n  host: 127.0.0.1\n  port: 9000\ndatabase:\n  path: /tmp/sv.db\nfetcher:\n  url_template: http://mirror/{repo}/{file}\n  timeout_secs: 5\nscan:\n  max_rounds: 3\n",
        );
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.database.path, "/tmp/sv.db");
        assert_eq!(config.fetcher.timeout_secs, 5);
        assert_eq!(config.scan.max_rounds, 3);
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/scanvault.yaml")).await.unwrap_err();
        assert!(matches!(err, ScanVaultError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_invalid_yaml() {
        let file = write_config("server: [unclosed\n");
        let err = parse_config(file.path()).await.unwrap_err();
        assert!(matches!(err, ScanVaultError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_parse_config_rejects_zero_rounds() {
        let file = write_config("scan:\n  max_rounds: 0\n");
        let err = parse_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("max_rounds"));
    }

    #[tokio::test]
    async fn test_load_config_defaults_without_path() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.scan.max_rounds, 2);
    }

    #[test]
    fn test_validate_values_template_placeholders() {
        let mut config = ScanVaultConfig::default();
        config.fetcher.url_template = "https://example.com/{repo}/static.json".to_string();
        let err = validate_values(&config).unwrap_err();
        assert!(err.to_string().contains("{file}"));
    }

    #[test]
    fn test_validate_values_placeholder_outside_path() {
        let mut config = ScanVaultConfig::default();
        config.fetcher.url_template = "https://example.com/{repo}/get?name={file}".to_string();
        let err = validate_values(&config).unwrap_err();
        assert!(err.to_string().contains("{file}"));
    }

    #[test]
    fn test_validate_values_zero_timeout() {
        let mut config = ScanVaultConfig::default();
        config.fetcher.timeout_secs = 0;
        assert!(validate_values(&config).is_err());
    }

    #[test]
    fn test_validate_values_default_ok() {
        assert!(validate_values(&ScanVaultConfig::default()).is_ok());
    }
}
