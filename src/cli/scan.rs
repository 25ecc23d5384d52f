use std::sync::Arc;
use crate::cli::commands::ScanArgs;
use crate::config;
use crate::db::Database;
use crate::errors::ScanVaultError;
use crate::fetcher::{ArtifactFetcher, HttpTransport};
use crate::models::ScanRequest;
use crate::pipeline::ScanOrchestrator;
use tracing::info;

pub async fn handle_scan(args: ScanArgs) -> Result<(), ScanVaultError> {
    let mut config = config::load_config(args.config.as_deref()).await?;
    if let Some(db) = &args.db {
        config.database.path = db.clone();
    }
    config::validate_values(&config)?;

    let db = Database::new(&config.database.path)?;
    let fetcher = Arc::new(ArtifactFetcher::new(Arc::new(HttpTransport::new()?), &config.fetcher));
    let orchestrator = ScanOrchestrator::new(fetcher, db, &config.scan);

    let request = ScanRequest { repository: args.repo, files: args.files };
    info!(repo = %request.repository, files = request.files.len(), "Running headless scan");

    let outcome = orchestrator.run_scan(&request).await;
    println!(
        "Ingested {}/{} files from {} in {} round(s)",
        outcome.completed, outcome.total, request.repository, outcome.rounds
    );

    if !outcome.is_success() {
        return Err(ScanVaultError::ScanIncomplete {
            completed: outcome.completed,
            total: outcome.total,
        });
    }
    Ok(())
}
