use crate::errors::ScanVaultError;
use crate::models::ScanResultWrapper;
use super::Database;
use tracing::{debug, warn};

/// Row counts from one `insert_batch` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub scans_inserted: usize,
    pub scans_existing: usize,
    pub vulnerabilities_inserted: usize,
    pub vulnerabilities_existing: usize,
    pub vulnerabilities_failed: usize,
}

impl Database {
    /// Persist every scan in `batch` along with its vulnerabilities.
    ///
    /// Each row is its own unit of work. A failed scan row fails the batch
    /// once the remaining scans have been attempted; rows already written
    /// stay written. A failed vulnerability row is logged and skipped.
    pub fn insert_batch(&self, batch: &[ScanResultWrapper]) -> Result<InsertSummary, ScanVaultError> {
        let mut summary = InsertSummary::default();
        let mut failed_scans = 0usize;

        for wrapper in batch {
            let scan = &wrapper.scan_result;
            match self.insert_scan_result(scan) {
                Ok(true) => summary.scans_inserted += 1,
                Ok(false) => summary.scans_existing += 1,
                Err(e) => {
                    warn!(scan_id = %scan.scan_id, error = %e, "Failed to insert scan result");
                    failed_scans += 1;
                    continue;
                }
            }

            for vuln in &scan.vulnerabilities {
                match self.insert_vulnerability(&scan.scan_id, vuln) {
                    Ok(true) => summary.vulnerabilities_inserted += 1,
                    Ok(false) => summary.vulnerabilities_existing += 1,
                    Err(e) => {
                        warn!(scan_id = %scan.scan_id, vuln_id = %vuln.id, error = %e, "Failed to insert vulnerability");
                        summary.vulnerabilities_failed += 1;
                    }
                }
            }
            debug!(scan_id = %scan.scan_id, vulnerabilities = scan.vulnerabilities.len(), "Stored scan result");
        }

        if failed_scans > 0 {
            return Err(ScanVaultError::Database(format!(
                "Failed to insert {} of {} scan results",
                failed_scans,
                batch.len()
            )));
        }

        Ok(summary)
    }
}
