use crate::cli::commands::QueryArgs;
use crate::errors::ScanVaultError;
use crate::models::{QueryFilter, QueryRequest, Vulnerability};
use tracing::info;

pub async fn handle_query(args: QueryArgs) -> Result<(), ScanVaultError> {
    info!(severity = %args.severity, server = %args.server, "Querying vulnerabilities");

    let client = reqwest::Client::new();
    let url = format!("{}/query", args.server.trim_end_matches('/'));
    let body = QueryRequest { filters: QueryFilter { severity: args.severity.clone() } };

    let resp = client.post(&url).json(&body).send().await
        .map_err(|e| ScanVaultError::Network(format!("Failed to query server: {}", e)))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScanVaultError::RemoteStatus { status: status.as_u16(), url });
    }

    let results: Vec<Vulnerability> = resp.json().await
        .map_err(|e| ScanVaultError::Network(format!("Invalid response: {}", e)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{} {} vulnerabilities", results.len(), args.severity);
        for vuln in &results {
            println!(
                "  {:<20} cvss {:>4.1}  {} {} -> {}  [{}]",
                vuln.id,
                vuln.cvss,
                vuln.package_name,
                vuln.current_version,
                if vuln.fixed_version.is_empty() { "-" } else { &vuln.fixed_version },
                vuln.status,
            );
        }
    }

    Ok(())
}
