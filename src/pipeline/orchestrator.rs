use std::sync::Arc;
use crate::config::ScanConfig;
use crate::db::{Database, InsertSummary};
use crate::errors::ScanVaultError;
use crate::fetcher::ArtifactFetcher;
use crate::models::ScanRequest;
use super::parser::parse_artifact;
use super::state::{ScanOutcome, ScanState};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Drives fetch → parse → persist for every file of a scan request, in
/// concurrent rounds, retrying only the files that have not succeeded.
pub struct ScanOrchestrator {
    fetcher: Arc<ArtifactFetcher>,
    db: Database,
    max_rounds: u32,
}

impl ScanOrchestrator {
    pub fn new(fetcher: Arc<ArtifactFetcher>, db: Database, config: &ScanConfig) -> Self {
        Self {
            fetcher,
            db,
            max_rounds: config.max_rounds,
        }
    }

    /// Ingest every file of `request`. Never fails outright: the outcome
    /// reports how many files made it within the round budget.
    ///
    /// The rounds run on their own task, so dropping the returned future
    /// (a caller that disconnects) does not cancel the retries.
    pub async fn run_scan(&self, request: &ScanRequest) -> ScanOutcome {
        let request_id = uuid::Uuid::new_v4();
        let span = info_span!("scan", %request_id, repo = %request.repository);

        let rounds = ScanRounds {
            fetcher: self.fetcher.clone(),
            db: self.db.clone(),
            max_rounds: self.max_rounds,
        };
        let owned = request.clone();
        let handle = tokio::spawn(async move { rounds.run(&owned).await }.instrument(span));

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(%request_id, error = %e, "Scan task panicked");
                ScanOutcome { total: request.files.len(), completed: 0, rounds: 0 }
            }
        }
    }
}

/// Everything one detached scan needs, owned.
struct ScanRounds {
    fetcher: Arc<ArtifactFetcher>,
    db: Database,
    max_rounds: u32,
}

impl ScanRounds {
    async fn run(&self, request: &ScanRequest) -> ScanOutcome {
        let mut state = ScanState::new(&request.files);
        info!(files = state.total(), max_rounds = self.max_rounds, "Starting scan");

        for round in 1..=self.max_rounds {
            if state.is_complete() {
                break;
            }

            let pending = state.pending_tasks();
            debug!(round, pending = pending.len(), "Starting round");

            // One task per pending file; the round ends when all have reported
            let handles: Vec<_> = pending.iter().map(|task| {
                let fetcher = self.fetcher.clone();
                let db = self.db.clone();
                let repository = request.repository.clone();
                let file_name = task.file_name.clone();
                tokio::spawn(async move {
                    ingest_file(&fetcher, db, &repository, &file_name).await
                })
            }).collect();

            let results = futures::future::join_all(handles).await;
            for (task, result) in pending.iter().zip(results) {
                match result {
                    Ok(Ok(summary)) => {
                        info!(
                            round,
                            file = %task.file_name,
                            scans_inserted = summary.scans_inserted,
                            scans_existing = summary.scans_existing,
                            vulnerabilities_inserted = summary.vulnerabilities_inserted,
                            vulnerabilities_failed = summary.vulnerabilities_failed,
                            "File ingested"
                        );
                        state.record(task.index, true);
                    }
                    Ok(Err(e)) => {
                        let stage = if e.is_fetch_failure() { "fetch" } else { "ingest" };
                        warn!(
                            round,
                            file = %task.file_name,
                            repo = %request.repository,
                            stage,
                            error_type = e.error_type(),
                            error = %e,
                            "File ingest failed"
                        );
                        state.record(task.index, false);
                    }
                    Err(e) => {
                        error!(round, file = %task.file_name, error = %e, "Ingest task panicked");
                        state.record(task.index, false);
                    }
                }
            }
            state.finish_round();
        }

        let outcome = state.outcome();
        if outcome.is_success() {
            info!(files = outcome.total, rounds = outcome.rounds, "Scan completed");
        } else {
            warn!(
                completed = outcome.completed,
                total = outcome.total,
                rounds = outcome.rounds,
                "Scan incomplete after retry budget"
            );
        }
        outcome
    }
}

/// One attempt at one file. Any error leaves the file pending.
async fn ingest_file(
    fetcher: &ArtifactFetcher,
    db: Database,
    repository: &str,
    file_name: &str,
) -> Result<InsertSummary, ScanVaultError> {
    let body = fetcher.fetch(file_name, repository).await?;
    let batch = parse_artifact(&body)?;
    debug!(file = %file_name, scans = batch.len(), "Parsed artifact");

    // SQLite calls block; keep them off the async workers
    tokio::task::spawn_blocking(move || db.insert_batch(&batch))
        .await
        .map_err(|e| ScanVaultError::Internal(format!("Store task failed: {}", e)))?
}
