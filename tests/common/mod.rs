#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use jira_summarizer::models::raw::{Author, ChangeItem};
use jira_summarizer::{ChangeEntry, IssueGateway, RawComment, RawIssue, Selector, SummarizerError, SummarizerResult};

pub const OLD: &str = "2024-01-01T00:00:00.000+0000";
pub const CUTOFF: &str = "2024-06-01T00:00:00.000+0000";
pub const RECENT: &str = "2024-06-10T12:00:00.000+0000";

/// In-memory issue tracker.
#[derive(Default)]
pub struct FakeGateway {
    issues: HashMap<String, RawIssue>,
    assigned: Vec<String>,
    children: HashMap<String, Vec<String>>,
    history: HashMap<String, Vec<ChangeEntry>>,
    comments: HashMap<String, Vec<RawComment>>,
    failing_comments: HashSet<String>,
    failing_history: HashSet<String>,
    hanging_comments: HashSet<String>,
    comment_delays: HashMap<String, u64>,
    pub posted: Mutex<Vec<(String, String)>>,
    pub comment_fetches: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(mut self, key: &str, status: &str, created: &str) -> Self {
        self.issues.insert(
            key.to_string(),
            RawIssue::new(key, &format!("{} summary", key), created, "Task", status),
        );
        self
    }

    pub fn assigned(mut self, key: &str) -> Self {
        self.assigned.push(key.to_string());
        self
    }

    pub fn child(mut self, parent: &str, child: &str) -> Self {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
        self
    }

    pub fn transition(mut self, key: &str, author: &str, created: &str, to: &str) -> Self {
        self.history.entry(key.to_string()).or_default().push(ChangeEntry {
            author: Author { display_name: author.to_string() },
            created: created.to_string(),
            items: vec![ChangeItem {
                field: "status".to_string(),
                to_string: Some(to.to_string()),
            }],
        });
        self
    }

    pub fn comment(mut self, key: &str, author: &str, created: &str, body: &str) -> Self {
        self.comments.entry(key.to_string()).or_default().push(RawComment {
            author: Author { display_name: author.to_string() },
            created: created.to_string(),
            body: body.to_string(),
        });
        self
    }

    pub fn failing_comments(mut self, key: &str) -> Self {
        self.failing_comments.insert(key.to_string());
        self
    }

    pub fn failing_history(mut self, key: &str) -> Self {
        self.failing_history.insert(key.to_string());
        self
    }

    pub fn hanging_comments(mut self, key: &str) -> Self {
        self.hanging_comments.insert(key.to_string());
        self
    }

    pub fn comment_delay(mut self, key: &str, millis: u64) -> Self {
        self.comment_delays.insert(key.to_string(), millis);
        self
    }

    fn lookup(&self, key: &str) -> SummarizerResult<RawIssue> {
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| SummarizerError::ApiError(format!("issue {} does not exist", key)))
    }
}

#[async_trait]
impl IssueGateway for FakeGateway {
    async fn query_top_level(&self, selector: &Selector) -> SummarizerResult<Vec<RawIssue>> {
        let keys = match selector {
            Selector::AssignedEpics => self.assigned.clone(),
            Selector::Keys(keys) if keys.is_empty() => {
                return Err(SummarizerError::InvalidInput("no issue keys given to query".into()))
            }
            Selector::Keys(keys) => keys.clone(),
        };
        keys.iter().map(|key| self.lookup(key)).collect()
    }

    async fn query_children(&self, parent_key: &str) -> SummarizerResult<Vec<RawIssue>> {
        self.children
            .get(parent_key)
            .map(|keys| keys.iter().map(|key| self.lookup(key)).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_change_history(&self, key: &str) -> SummarizerResult<Vec<ChangeEntry>> {
        if self.failing_history.contains(key) {
            return Err(SummarizerError::ApiError("403 Forbidden".into()));
        }
        Ok(self.history.get(key).cloned().unwrap_or_default())
    }

    async fn fetch_comments(&self, key: &str) -> SummarizerResult<Vec<RawComment>> {
        self.comment_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(millis) = self.comment_delays.get(key) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        if self.hanging_comments.contains(key) {
            std::future::pending::<()>().await;
        }
        if self.failing_comments.contains(key) {
            return Err(SummarizerError::ApiError("500 Internal Server Error".into()));
        }
        Ok(self.comments.get(key).cloned().unwrap_or_default())
    }

    async fn post_comment(&self, key: &str, text: &str) -> SummarizerResult<()> {
        self.posted
            .lock()
            .unwrap()
            .push((key.to_string(), text.to_string()));
        Ok(())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://jira.example.com/browse/{}", key)
    }
}
