use axum::{body::Bytes, extract::State, Json};
use crate::api::AppState;
use crate::errors::ScanVaultError;
use crate::models::{QueryRequest, Vulnerability};

pub async fn query_vulnerabilities(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Vulnerability>>, ScanVaultError> {
    // An empty body is an empty filter, which matches nothing
    let req: QueryRequest = if body.is_empty() {
        QueryRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ScanVaultError::InvalidRequest(format!("Malformed query body: {}", e)))?
    };

    let queries = state.queries.clone();
    let results = tokio::task::spawn_blocking(move || queries.query(&req.filters))
        .await
        .map_err(|e| ScanVaultError::Internal(format!("Query task failed: {}", e)))??;
    Ok(Json(results))
}
