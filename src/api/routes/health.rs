use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "scanvault",
        "version": env!("CARGO_PKG_VERSION"),
        "build_timestamp": option_env!("BUILD_TIMESTAMP"),
        "git_hash": option_env!("GIT_HASH"),
    }))
}
