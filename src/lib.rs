// Module declarations
pub mod aggregate;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod formatting;
pub mod logging;
pub mod models;


// Re-export commonly used items
pub use aggregate::{assemble, GroupingMode, IssueBuilder};
pub use client::{IssueGateway, JiraClient, Selector};
pub use config::{load_config, Config, Credentials};
pub use error::{SummarizerError, SummarizerResult};
pub use models::*;
