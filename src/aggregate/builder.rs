//! Recursive construction of issue trees.
//!
//! A node resolves its status history, its comments and its children
//! concurrently. Children are built with the same routine, so one call
//! materializes a whole subtree. Every remote call races the cancellation
//! token of the top-level build it belongs to, and the first failure cancels
//! that token so the rest of the subtree stops early.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{try_join_all, BoxFuture, FutureExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::IssueGateway;
use crate::error::{SummarizerError, SummarizerResult};
use crate::models::{parse_jira_time, ChangeEntry, Comment, IssueNode, RawComment, RawIssue, Status};

const STATUS_FIELD: &str = "status";

#[derive(Clone)]
pub struct IssueBuilder {
    gateway: Arc<dyn IssueGateway>,
}

impl IssueBuilder {
    pub fn new(gateway: Arc<dyn IssueGateway>) -> Self {
        Self { gateway }
    }

    /// Build `raw` and its whole subtree.
    ///
    /// Errors name the issue whose build failed. On failure `cancel` is
    /// cancelled.
    pub fn build(
        &self,
        raw: RawIssue,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, SummarizerResult<IssueNode>> {
        build_node(self.gateway.clone(), raw, cancel)
    }
}

fn build_node(
    gateway: Arc<dyn IssueGateway>,
    raw: RawIssue,
    cancel: CancellationToken,
) -> BoxFuture<'static, SummarizerResult<IssueNode>> {
    async move {
        let key = raw.key.clone();
        debug!("building issue {}", key);

        let result = populate(gateway, raw, &cancel)
            .await
            .map_err(|e| e.for_issue(&key));

        if let Err(e) = &result {
            if !e.is_cancelled() {
                cancel.cancel();
            }
        }
        result
    }
    .boxed()
}

async fn populate(
    gateway: Arc<dyn IssueGateway>,
    raw: RawIssue,
    cancel: &CancellationToken,
) -> SummarizerResult<IssueNode> {
    let RawIssue { key, fields } = raw;
    let created = parse_jira_time(&fields.created)?;

    let (status, comments, children) = tokio::try_join!(
        resolve_status(gateway.as_ref(), &key, &fields.status.name, cancel),
        resolve_comments(gateway.as_ref(), &key, cancel),
        resolve_children(&gateway, &key, cancel),
    )?;

    Ok(IssueNode {
        url: gateway.browse_url(&key),
        key,
        summary: fields.summary,
        description: fields.description.unwrap_or_default(),
        issue_type: fields.issue_type.name,
        created,
        status,
        comments,
        children,
    })
}

async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = SummarizerResult<T>>,
) -> SummarizerResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SummarizerError::Cancelled),
        result = fut => result,
    }
}

async fn resolve_status(
    gateway: &dyn IssueGateway,
    key: &str,
    current: &str,
    cancel: &CancellationToken,
) -> SummarizerResult<Status> {
    let history = match guarded(cancel, gateway.fetch_change_history(key)).await {
        Ok(history) => history,
        Err(SummarizerError::Cancelled) => return Err(SummarizerError::Cancelled),
        Err(e) => {
            warn!("ignoring change history of {}: {}", key, e);
            Vec::new()
        }
    };

    Ok(latest_transition(&history, current))
}

/// Most recent transition into `current`, whatever the order of `history`.
pub fn latest_transition(history: &[ChangeEntry], current: &str) -> Status {
    let latest = history
        .iter()
        .filter(|entry| {
            entry
                .items
                .iter()
                .any(|item| item.field == STATUS_FIELD && item.to_string.as_deref() == Some(current))
        })
        .filter_map(|entry| match parse_jira_time(&entry.created) {
            Ok(at) => Some((at, entry)),
            Err(e) => {
                warn!("skipping changelog entry: {}", e);
                None
            }
        })
        .max_by_key(|(at, _)| *at);

    match latest {
        Some((at, entry)) => Status {
            name: current.to_string(),
            changed_by: entry.author.display_name.clone(),
            changed_at: Some(at),
        },
        None => Status {
            name: current.to_string(),
            ..Status::default()
        },
    }
}

async fn resolve_comments(
    gateway: &dyn IssueGateway,
    key: &str,
    cancel: &CancellationToken,
) -> SummarizerResult<Vec<Comment>> {
    let raw = guarded(cancel, gateway.fetch_comments(key)).await?;
    Ok(convert_comments(key, raw))
}

fn convert_comments(key: &str, raw: Vec<RawComment>) -> Vec<Comment> {
    let mut comments: Vec<Comment> = raw
        .into_iter()
        .filter_map(|comment| match parse_jira_time(&comment.created) {
            Ok(created_at) => Some(Comment {
                content: comment.body,
                author: comment.author.display_name,
                created_at,
            }),
            Err(e) => {
                warn!("skipping comment on {}: {}", key, e);
                None
            }
        })
        .collect();
    comments.sort_by_key(|c| c.created_at);
    comments
}

async fn resolve_children(
    gateway: &Arc<dyn IssueGateway>,
    key: &str,
    cancel: &CancellationToken,
) -> SummarizerResult<Vec<IssueNode>> {
    let raw_children = guarded(cancel, gateway.query_children(key)).await?;
    debug!("{} has {} children", key, raw_children.len());

    try_join_all(
        raw_children
            .into_iter()
            .map(|raw| build_node(gateway.clone(), raw, cancel.clone())),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw::{Author, ChangeItem};

    fn entry(author: &str, created: &str, field: &str, to: &str) -> ChangeEntry {
        ChangeEntry {
            author: Author { display_name: author.to_string() },
            created: created.to_string(),
            items: vec![ChangeItem {
                field: field.to_string(),
                to_string: Some(to.to_string()),
            }],
        }
    }

    #[test]
    fn latest_transition_prefers_later_timestamp_over_list_order() {
        let history = vec![
            entry("Late", "2024-05-10T09:00:00.000+0000", "status", "In Progress"),
            entry("Early", "2024-05-01T09:00:00.000+0000", "status", "In Progress"),
            entry("Other", "2024-05-20T09:00:00.000+0000", "status", "Done"),
        ];
        let status = latest_transition(&history, "In Progress");
        assert_eq!(status.changed_by, "Late");
        assert_eq!(
            status.changed_at,
            Some(parse_jira_time("2024-05-10T09:00:00.000+0000").unwrap())
        );

        let mut reversed = history.clone();
        reversed.reverse();
        assert_eq!(latest_transition(&reversed, "In Progress"), status);
    }

    #[test]
    fn latest_transition_ignores_other_fields_and_bad_timestamps() {
        let history = vec![
            entry("Assignee", "2024-05-30T09:00:00.000+0000", "assignee", "In Progress"),
            entry("Broken", "not a date", "status", "In Progress"),
            entry("Good", "2024-05-02T09:00:00.000+0000", "status", "In Progress"),
        ];
        let status = latest_transition(&history, "In Progress");
        assert_eq!(status.changed_by, "Good");
    }

    #[test]
    fn latest_transition_without_match_keeps_unknown_time() {
        let status = latest_transition(&[], "Blocked");
        assert_eq!(status.name, "Blocked");
        assert!(status.changed_at.is_none());
        assert!(status.changed_by.is_empty());
    }

    #[test]
    fn comments_are_sorted_and_bad_timestamps_skipped() {
        let raw = vec![
            RawComment {
                author: Author { display_name: "B".into() },
                created: "2024-05-02T00:00:00.000+0000".into(),
                body: "second".into(),
            },
            RawComment {
                author: Author { display_name: "X".into() },
                created: "garbage".into(),
                body: "dropped".into(),
            },
            RawComment {
                author: Author { display_name: "A".into() },
                created: "2024-05-01T00:00:00.000+0000".into(),
                body: "first".into(),
            },
        ];
        let comments = convert_comments("K-1", raw);
        let bodies: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }
}
