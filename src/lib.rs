pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod exit;
pub mod extract;
pub mod graph;
pub mod registry;
pub mod reporting;
pub mod source;
pub mod types;
pub mod validate;
