use serde::{Deserialize, Serialize};

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/{repo}/vulnerability_scans/refs/heads/main/{file}";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ROUNDS: u32 = 2;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScanVaultConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub fetcher: FetcherConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "./data/scanvault.db".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Remote address template; `{repo}` and `{file}` are substituted per artifact.
    pub url_template: String,
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Attempts per file, counting the first.
    pub max_rounds: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_rounds: DEFAULT_MAX_ROUNDS }
    }
}
