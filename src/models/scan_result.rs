use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::vulnerability::Vulnerability;

/// One element of a scan artifact: the artifact is a JSON array of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResultWrapper {
    #[serde(rename = "scanResults")]
    pub scan_result: ScanResult,
}

/// A single scan run against one resource, as published by the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Globally unique scan identifier; primary key of the `scan_results` table.
    pub scan_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub scan_status: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default)]
    pub summary: ScanSummary,
    #[serde(default, rename = "scan_metadata")]
    pub metadata: ScanMetadata,
}

/// Scanner-computed totals. Stored as an opaque JSON column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    #[serde(default)]
    pub total_vulnerabilities: i64,
    #[serde(default)]
    pub severity_counts: BTreeMap<String, i64>,
    #[serde(default)]
    pub fixable_count: i64,
    #[serde(default)]
    pub compliant: bool,
    /// Keys the scanner adds beyond the known totals, kept as published.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scanner configuration in effect for the run. Stored as an opaque JSON column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanMetadata {
    #[serde(default)]
    pub scanner_version: String,
    #[serde(default)]
    pub policies_version: String,
    #[serde(default)]
    pub scanning_rules: Vec<String>,
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `scan_results` row read back from the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredScanResult {
    pub scan_id: String,
    pub timestamp: String,
    pub scan_status: String,
    pub resource_type: String,
    pub resource_name: String,
    pub summary: ScanSummary,
    pub scan_metadata: ScanMetadata,
    pub ingested_at: String,
}
