use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use crate::errors::ScanVaultError;
use tracing::{info, warn};

/// Shared handle to the SQLite store. Cloning shares the underlying connection.
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, ScanVaultError> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| ScanVaultError::Database(format!("Failed to open database: {}", e)))?;

        // WAL lets readers proceed while scan tasks are writing
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| ScanVaultError::Database(format!("Failed to set pragmas: {}", e)))?;

        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        info!(path, "Database ready");
        Ok(db)
    }

    pub fn in_memory() -> Result<Self, ScanVaultError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ScanVaultError::Database(format!("Failed to open in-memory db: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), ScanVaultError> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| ScanVaultError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, ScanVaultError> {
        self.conn
            .lock()
            .map_err(|_| ScanVaultError::Database("Connection lock poisoned".into()))
    }

    /// Drop both tables. Only used to tear down test fixtures; the store is
    /// unusable for writes afterwards.
    pub fn drop_tables(&self) -> Result<(), ScanVaultError> {
        let conn = self.lock()?;
        for table in ["scan_results", "vulnerabilities"] {
            match conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", table)) {
                Ok(()) => info!(table, "Table dropped"),
                Err(e) => {
                    warn!(table, error = %e, "Failed to drop table");
                    return Err(ScanVaultError::Database(format!("Failed to drop {}: {}", table, e)));
                }
            }
        }
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}
