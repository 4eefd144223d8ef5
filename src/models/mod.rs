pub mod comment;
pub mod issue;
pub mod raw;

// Re-export commonly used types
pub use comment::Comment;
pub use issue::{IssueNode, Status, Tree};
pub use raw::{ChangeEntry, ChangeItem, RawComment, RawIssue};

use chrono::{DateTime, FixedOffset};

use crate::error::{SummarizerError, SummarizerResult};

/// Parse a Jira timestamp such as `2024-03-01T10:20:30.123+0000`.
pub fn parse_jira_time(value: &str) -> SummarizerResult<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map_err(|e| SummarizerError::ParseError(format!("invalid timestamp {:?}: {}", value, e)))
}
