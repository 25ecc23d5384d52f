use crate::errors::ScanVaultError;
use crate::models::ScanResultWrapper;

/// Decode a scan artifact: a JSON array of `{"scanResults": {...}}` objects.
///
/// Type mismatches and missing keys fail the whole artifact, as do blank
/// scan or vulnerability ids, since those are the store's primary keys.
pub fn parse_artifact(body: &[u8]) -> Result<Vec<ScanResultWrapper>, ScanVaultError> {
    let results: Vec<ScanResultWrapper> = serde_json::from_slice(body)?;

    for (i, wrapper) in results.iter().enumerate() {
        let scan = &wrapper.scan_result;
        if scan.scan_id.trim().is_empty() {
            return Err(ScanVaultError::InvalidArtifact(format!("entry {} has an empty scan_id", i)));
        }
        if let Some(vuln) = scan.vulnerabilities.iter().find(|v| v.id.trim().is_empty()) {
            return Err(ScanVaultError::InvalidArtifact(format!(
                "scan {} has a vulnerability with an empty id (severity {})",
                scan.scan_id, vuln.severity
            )));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
      {
        "scanResults": {
          "scan_id": "VULN_SCAN_001",
          "timestamp": "2025-01-28T14:30:00Z",
          "scan_status": "completed",
          "resource_type": "container",
          "resource_name": "payment-processor:1.2.0",
          "vulnerabilities": [
            {
              "id": "CVE-2024-1111",
              "severity": "HIGH",
              "cvss": 8.2,
              "status": "active",
              "package_name": "openssl",
              "current_version": "3.0.7",
              "fixed_version": "3.0.8",
              "description": "Buffer overflow vulnerability in OpenSSL",
              "published_date": "2025-01-15T00:00:00Z",
              "link": "https://nvd.nist.gov/vuln/detail/CVE-2024-1111",
              "risk_factors": ["Remote Code Execution", "Exploit Available"]
            }
          ],
          "summary": {
            "total_vulnerabilities": 1,
            "severity_counts": {"CRITICAL": 0, "HIGH": 1, "MEDIUM": 0, "LOW": 0},
            "fixable_count": 1,
            "compliant": false
          },
          "scan_metadata": {
            "scanner_version": "2.4.1",
            "policies_version": "2025.1.0",
            "scanning_rules": ["vulnerability", "compliance"],
            "excluded_paths": ["/tmp", "/var/log"]
          }
        }
      }
    ]"#;

    #[test]
    fn test_parse_sample_artifact() {
        let results = parse_artifact(SAMPLE.as_bytes()).unwrap();
        assert_eq!(results.len(), 1);
        let scan = &results[0].scan_result;
        assert_eq!(scan.scan_id, "VULN_SCAN_001");
        assert_eq!(scan.vulnerabilities.len(), 1);
        assert_eq!(scan.vulnerabilities[0].cvss, 8.2);
        assert_eq!(scan.vulnerabilities[0].risk_factors.len(), 2);
        assert_eq!(scan.summary.severity_counts["HIGH"], 1);
        assert_eq!(scan.metadata.excluded_paths, vec!["/tmp", "/var/log"]);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_artifact(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated_body() {
        let truncated = &SAMPLE.as_bytes()[..SAMPLE.len() / 2];
        assert!(matches!(parse_artifact(truncated), Err(ScanVaultError::Json(_))));
    }

    #[test]
    fn test_parse_object_instead_of_array() {
        let err = parse_artifact(br#"{"scanResults": {"scan_id": "S1"}}"#).unwrap_err();
        assert!(matches!(err, ScanVaultError::Json(_)));
    }

    #[test]
    fn test_parse_missing_scan_id() {
        let err = parse_artifact(br#"[{"scanResults": {"scan_status": "completed"}}]"#).unwrap_err();
        assert!(matches!(err, ScanVaultError::Json(_)));
    }

    #[test]
    fn test_parse_wrong_field_type() {
        let body = br#"[{"scanResults": {"scan_id": "S1", "vulnerabilities": [{"id": "V1", "severity": "LOW", "cvss": "high"}]}}]"#;
        assert!(matches!(parse_artifact(body), Err(ScanVaultError::Json(_))));
    }

    #[test]
    fn test_parse_blank_ids_rejected() {
        let err = parse_artifact(br#"[{"scanResults": {"scan_id": "  "}}]"#).unwrap_err();
        assert!(matches!(err, ScanVaultError::InvalidArtifact(_)));

        let body = br#"[{"scanResults": {"scan_id": "S1", "vulnerabilities": [{"id": "", "severity": "LOW"}]}}]"#;
        assert!(matches!(parse_artifact(body), Err(ScanVaultError::InvalidArtifact(_))));
    }

    #[test]
    fn test_parse_minimal_entry_defaults() {
        let results = parse_artifact(br#"[{"scanResults": {"scan_id": "S1"}}]"#).unwrap();
        let scan = &results[0].scan_result;
        assert!(scan.vulnerabilities.is_empty());
        assert_eq!(scan.summary.total_vulnerabilities, 0);
        assert!(scan.metadata.scanning_rules.is_empty());
    }
}
