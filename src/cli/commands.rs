use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "scanvault", version, about = "Vulnerability scan ingestion and query service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Ingest scan artifacts once, without starting the server
    Scan(ScanArgs),
    /// Query a running server for vulnerabilities by severity
    Query(QueryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Repository that publishes the scan artifacts
    #[arg(short, long)]
    pub repo: String,

    /// Artifact file name (repeat for several)
    #[arg(short, long = "file", required = true)]
    pub files: Vec<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Severity to match exactly, e.g. HIGH
    #[arg(short, long)]
    pub severity: String,

    /// Base URL of the running server
    #[arg(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
