use async_trait::async_trait;

use crate::error::SummarizerResult;
use crate::models::{ChangeEntry, RawComment, RawIssue};

/// Which issues start a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Open epics assigned to the authenticated user.
    AssignedEpics,
    /// Exactly these issue keys.
    Keys(Vec<String>),
}

impl Selector {
    pub fn from_keys(keys: Vec<String>) -> Self {
        if keys.is_empty() {
            Selector::AssignedEpics
        } else {
            Selector::Keys(keys)
        }
    }
}

/// Remote issue tracker operations the aggregation engine depends on.
#[async_trait]
pub trait IssueGateway: Send + Sync {
    async fn query_top_level(&self, selector: &Selector) -> SummarizerResult<Vec<RawIssue>>;

    async fn query_children(&self, parent_key: &str) -> SummarizerResult<Vec<RawIssue>>;

    async fn fetch_change_history(&self, key: &str) -> SummarizerResult<Vec<ChangeEntry>>;

    async fn fetch_comments(&self, key: &str) -> SummarizerResult<Vec<RawComment>>;

    async fn post_comment(&self, key: &str, text: &str) -> SummarizerResult<()>;

    /// Human-facing link to an issue.
    fn browse_url(&self, key: &str) -> String;
}
