use serde::{Deserialize, Serialize};

/// A single vulnerability finding. This is both the artifact shape and the
/// shape returned by severity queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub severity: String,
    #[serde(default)]
    pub cvss: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub current_version: String,
    #[serde(default)]
    pub fixed_version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}
