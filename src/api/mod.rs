pub mod routes;
pub mod errors;

use std::sync::Arc;
use axum::Router;
use tower_http::trace::TraceLayer;
use crate::config::ScanVaultConfig;
use crate::db::Database;
use crate::errors::ScanVaultError;
use crate::fetcher::{ArtifactFetcher, HttpTransport, Transport};
use crate::pipeline::ScanOrchestrator;
use crate::query::QueryService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub orchestrator: Arc<ScanOrchestrator>,
    pub queries: QueryService,
}

impl AppState {
    /// Wire the service around an existing store and transport.
    pub fn new(db: Database, transport: Arc<dyn Transport>, config: &ScanVaultConfig) -> Self {
        let fetcher = Arc::new(ArtifactFetcher::new(transport, &config.fetcher));
        let orchestrator = Arc::new(ScanOrchestrator::new(fetcher, db.clone(), &config.scan));
        Self {
            queries: QueryService::new(db.clone()),
            db,
            orchestrator,
        }
    }
}

pub async fn create_app_state(config: &ScanVaultConfig) -> Result<AppState, ScanVaultError> {
    let db = Database::new(&config.database.path)?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
    Ok(AppState::new(db, transport, config))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(routes::health::health_check))
        .route("/scan", axum::routing::post(routes::scan::run_scan))
        .route("/query", axum::routing::post(routes::query::query_vulnerabilities))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
