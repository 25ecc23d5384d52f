use serde::{Deserialize, Serialize};

/// Inbound scan request: a repository and the artifact files to ingest from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    #[serde(rename = "repo")]
    pub repository: String,
    pub files: Vec<String>,
}

/// Inbound query request. Missing fields decode to an empty filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub filters: QueryFilter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(default)]
    pub severity: String,
}
