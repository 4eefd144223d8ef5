//! Point-in-time pruning of assembled trees.
//!
//! Creation and status changes count only when strictly after the cutoff,
//! while comments count from the cutoff itself onwards.

use chrono::{DateTime, FixedOffset};

use crate::models::{IssueNode, Tree};

/// Prune `node` in place, returning whether it should be kept.
///
/// Stale comments are dropped, the status is cleared unless it changed after
/// `cutoff`, and children are filtered recursively. A node survives when it
/// shows activity of its own or keeps at least one child.
pub fn retain_recent(node: &mut IssueNode, cutoff: &DateTime<FixedOffset>) -> bool {
    node.comments.retain(|comment| comment.created_at >= *cutoff);
    node.children.retain_mut(|child| retain_recent(child, cutoff));

    let active = has_self_activity(node, cutoff);
    if !status_changed_after(node, cutoff) {
        node.status.clear();
    }

    active || !node.children.is_empty()
}

/// Whether `node` itself changed since `cutoff`, ignoring its children.
pub fn has_self_activity(node: &IssueNode, cutoff: &DateTime<FixedOffset>) -> bool {
    node.created > *cutoff
        || status_changed_after(node, cutoff)
        || node.comments.iter().any(|c| c.created_at >= *cutoff)
}

fn status_changed_after(node: &IssueNode, cutoff: &DateTime<FixedOffset>) -> bool {
    node.status.changed_at.is_some_and(|at| at > *cutoff)
}

impl Tree {
    /// Prune the whole tree. A virtual root survives while it keeps children.
    pub fn retain_recent(&mut self, cutoff: &DateTime<FixedOffset>) -> bool {
        match self {
            Tree::Issue(node) => retain_recent(node, cutoff),
            Tree::Virtual { children } => {
                children.retain_mut(|child| retain_recent(child, cutoff));
                !children.is_empty()
            }
        }
    }
}
