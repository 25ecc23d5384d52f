pub mod orchestrator;
pub mod parser;
pub mod state;

pub use orchestrator::ScanOrchestrator;
pub use parser::parse_artifact;
pub use state::{FileTask, ScanOutcome, ScanState};
