pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod query;
