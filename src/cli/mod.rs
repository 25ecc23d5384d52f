pub mod commands;
pub mod scan;
pub mod query;
pub mod serve;

pub use commands::{Cli, Commands};
