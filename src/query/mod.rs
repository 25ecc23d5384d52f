use crate::db::Database;
use crate::errors::ScanVaultError;
use crate::models::{QueryFilter, Vulnerability};
use tracing::debug;

/// Read path for persisted vulnerabilities.
#[derive(Clone)]
pub struct QueryService {
    db: Database,
}

impl QueryService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every vulnerability with exactly `filter.severity`. The value is not
    /// validated; an unknown or empty severity simply matches nothing.
    pub fn query(&self, filter: &QueryFilter) -> Result<Vec<Vulnerability>, ScanVaultError> {
        let results = self.db.query_by_severity(&filter.severity)?;
        debug!(severity = %filter.severity, matches = results.len(), "Severity query");
        Ok(results)
    }
}
