use crate::errors::ScanVaultError;
use crate::models::Vulnerability;
use super::Database;

impl Database {
    /// Insert-if-absent on `id`, tagging the row with the scan that reported it.
    /// Returns `true` when a new row was written.
    pub fn insert_vulnerability(&self, scan_id: &str, vuln: &Vulnerability) -> Result<bool, ScanVaultError> {
        let risk_factors = serde_json::to_string(&vuln.risk_factors)?;

        let conn = self.lock()?;
        let affected = conn.execute(
            "INSERT INTO vulnerabilities (id, scan_id, severity, cvss, status, package_name, current_version, fixed_version, description, published_date, link, risk_factors) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) ON CONFLICT(id) DO NOTHING",
            rusqlite::params![
                vuln.id,
                scan_id,
                vuln.severity,
                vuln.cvss,
                vuln.status,
                vuln.package_name,
                vuln.current_version,
                vuln.fixed_version,
                vuln.description,
                vuln.published_date,
                vuln.link,
                risk_factors,
            ],
        ).map_err(|e| ScanVaultError::Database(format!("Failed to insert vulnerability: {}", e)))?;
        Ok(affected > 0)
    }

    /// All vulnerabilities whose severity equals `severity` exactly, in
    /// storage order. No pagination.
    pub fn query_by_severity(&self, severity: &str) -> Result<Vec<Vulnerability>, ScanVaultError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, severity, cvss, status, package_name, current_version, fixed_version, description, published_date, link, risk_factors FROM vulnerabilities WHERE severity = ?1"
        ).map_err(|e| ScanVaultError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![severity], |row: &rusqlite::Row| {
            let vuln = Vulnerability {
                id: row.get(0)?,
                severity: row.get(1)?,
                cvss: row.get(2)?,
                status: row.get(3)?,
                package_name: row.get(4)?,
                current_version: row.get(5)?,
                fixed_version: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                description: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                published_date: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
                link: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
                risk_factors: Vec::new(),
            };
            let risk_factors: String = row.get(10)?;
            Ok((vuln, risk_factors))
        }).map_err(|e| ScanVaultError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            let (mut vuln, risk_factors) = row
                .map_err(|e| ScanVaultError::Database(format!("Row error: {}", e)))?;
            vuln.risk_factors = serde_json::from_str(&risk_factors)?;
            results.push(vuln);
        }
        Ok(results)
    }

    pub fn count_vulnerabilities(&self) -> Result<usize, ScanVaultError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM vulnerabilities", [], |row| row.get(0))
            .map_err(|e| ScanVaultError::Database(format!("Count failed: {}", e)))?;
        Ok(count as usize)
    }

    /// Scan id recorded for a vulnerability at first insert.
    pub fn vulnerability_scan_id(&self, id: &str) -> Result<Option<String>, ScanVaultError> {
        let conn = self.lock()?;
        match conn.query_row(
            "SELECT scan_id FROM vulnerabilities WHERE id = ?1",
            rusqlite::params![id],
            |row| row.get::<_, String>(0),
        ) {
            Ok(scan_id) => Ok(Some(scan_id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(ScanVaultError::Database(format!("Query error: {}", e))),
        }
    }
}
