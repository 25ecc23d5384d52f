pub mod connection;
pub mod schema;
pub mod scan_results;
pub mod vulnerabilities;
pub mod batch;

pub use batch::InsertSummary;
pub use connection::Database;
