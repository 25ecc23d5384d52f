use chrono::Utc;
use crate::errors::ScanVaultError;
use crate::models::{ScanResult, StoredScanResult};
use super::Database;

impl Database {
    /// Insert-if-absent on `scan_id`. Returns `true` when a new row was
    /// written and `false` when the scan was already stored.
    pub fn insert_scan_result(&self, scan: &ScanResult) -> Result<bool, ScanVaultError> {
        let summary = serde_json::to_string(&scan.summary)?;
        let metadata = serde_json::to_string(&scan.metadata)?;

        let conn = self.lock()?;
        let affected = conn.execute(
            "INSERT INTO scan_results (scan_id, timestamp, scan_status, resource_type, resource_name, summary, scan_metadata, ingested_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) ON CONFLICT(scan_id) DO NOTHING",
            rusqlite::params![
                scan.scan_id,
                scan.timestamp,
                scan.scan_status,
                scan.resource_type,
                scan.resource_name,
                summary,
                metadata,
                Utc::now().to_rfc3339(),
            ],
        ).map_err(|e| ScanVaultError::Database(format!("Failed to insert scan result: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn get_scan_result(&self, scan_id: &str) -> Result<Option<StoredScanResult>, ScanVaultError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT scan_id, timestamp, scan_status, resource_type, resource_name, summary, scan_metadata, ingested_at FROM scan_results WHERE scan_id = ?1"
        ).map_err(|e| ScanVaultError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![scan_id], |row: &rusqlite::Row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        });

        let (scan_id, timestamp, scan_status, resource_type, resource_name, summary, metadata, ingested_at) = match result {
            Ok(v) => v,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(ScanVaultError::Database(format!("Query error: {}", e))),
        };

        Ok(Some(StoredScanResult {
            scan_id,
            timestamp,
            scan_status,
            resource_type,
            resource_name,
            summary: serde_json::from_str(&summary)?,
            scan_metadata: serde_json::from_str(&metadata)?,
            ingested_at,
        }))
    }

    pub fn count_scan_results(&self) -> Result<usize, ScanVaultError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM scan_results", [], |row| row.get(0))
            .map_err(|e| ScanVaultError::Database(format!("Count failed: {}", e)))?;
        Ok(count as usize)
    }
}
