use chrono::{DateTime, FixedOffset};

use super::Comment;

#[derive(Debug, Clone, PartialEq)]
pub struct IssueNode {
    pub key: String,
    pub url: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub created: DateTime<FixedOffset>,
    pub status: Status,
    pub comments: Vec<Comment>,
    pub children: Vec<IssueNode>,
}

/// Latest transition into the issue's current status.
///
/// `changed_at` is `None` when no matching changelog entry was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub name: String,
    pub changed_by: String,
    pub changed_at: Option<DateTime<FixedOffset>>,
}

impl Status {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Status::default();
    }
}

impl IssueNode {
    /// An issue tracking work through its children.
    pub fn is_embedder(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A report root: either a real issue or a virtual container grouping
/// otherwise unrelated top-level issues.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Issue(IssueNode),
    Virtual { children: Vec<IssueNode> },
}

impl Tree {
    /// Key to post the report on. Virtual roots have no remote identity.
    pub fn key(&self) -> Option<&str> {
        match self {
            Tree::Issue(node) => Some(&node.key),
            Tree::Virtual { .. } => None,
        }
    }

    pub fn children(&self) -> &[IssueNode] {
        match self {
            Tree::Issue(node) => &node.children,
            Tree::Virtual { children } => children,
        }
    }

    pub fn is_embedder(&self) -> bool {
        match self {
            Tree::Issue(node) => node.is_embedder(),
            Tree::Virtual { .. } => true,
        }
    }

    /// Drop the root's own comments, keeping the subtree intact.
    pub fn clear_own_comments(&mut self) {
        if let Tree::Issue(node) = self {
            node.comments.clear();
        }
    }
}
