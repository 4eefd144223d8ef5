pub mod gateway;
pub mod jira_client;

pub use gateway::{IssueGateway, Selector};
pub use jira_client::JiraClient;
