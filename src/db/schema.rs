pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scan_results (
    scan_id TEXT PRIMARY KEY,
    timestamp TEXT,
    scan_status TEXT,
    resource_type TEXT,
    resource_name TEXT,
    summary TEXT NOT NULL,
    scan_metadata TEXT NOT NULL,
    ingested_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vulnerabilities (
    id TEXT PRIMARY KEY,
    scan_id TEXT NOT NULL,
    severity TEXT NOT NULL,
    cvss REAL NOT NULL,
    status TEXT NOT NULL,
    package_name TEXT NOT NULL,
    current_version TEXT NOT NULL,
    fixed_version TEXT,
    description TEXT,
    published_date TEXT,
    link TEXT,
    risk_factors TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_vulnerability_severity ON vulnerabilities(severity);
";
