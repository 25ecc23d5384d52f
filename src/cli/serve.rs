use crate::cli::commands::ServeArgs;
use crate::config::{self, ScanVaultConfig};
use crate::errors::ScanVaultError;
use crate::api;
use tracing::info;

pub(crate) fn apply_overrides(mut config: ScanVaultConfig, args: &ServeArgs) -> Result<ScanVaultConfig, ScanVaultError> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = &args.db {
        config.database.path = db.clone();
    }
    config::validate_values(&config)?;
    Ok(config)
}

pub async fn handle_serve(args: ServeArgs) -> Result<(), ScanVaultError> {
    let config = config::load_config(args.config.as_deref()).await?;
    let config = apply_overrides(config, &args)?;

    info!(host = %config.server.host, port = config.server.port, db = %config.database.path, "Starting API server");

    let state = api::create_app_state(&config).await?;
    let app = api::build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ScanVaultError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
