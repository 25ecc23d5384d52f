use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::ScanVaultError;
use crate::models::ScanRequest;

/// 200 once every file is ingested, 500 otherwise. Which files failed is
/// only visible in the logs.
pub async fn run_scan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ScanVaultError> {
    // Decoded whatever the content-type says
    let req: ScanRequest = serde_json::from_slice(&body)
        .map_err(|e| ScanVaultError::InvalidRequest(format!("Malformed scan body: {}", e)))?;

    let outcome = state.orchestrator.run_scan(&req).await;

    if !outcome.is_success() {
        return Err(ScanVaultError::ScanIncomplete {
            completed: outcome.completed,
            total: outcome.total,
        });
    }

    Ok(Json(json!({
        "status": "completed",
        "repo": req.repository,
        "files": outcome.total,
    })))
}
