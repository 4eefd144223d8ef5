use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawIssue {
    pub key: String,
    pub fields: RawIssueFields,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawIssueFields {
    #[serde(default)]
    pub summary: String,
    pub description: Option<String>,
    pub created: String,
    #[serde(rename = "issuetype")]
    pub issue_type: Named,
    pub status: Named,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Author {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangeEntry {
    #[serde(default)]
    pub author: Author,
    pub created: String,
    #[serde(default)]
    pub items: Vec<ChangeItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangeItem {
    pub field: String,
    #[serde(rename = "toString")]
    pub to_string: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawComment {
    #[serde(default)]
    pub author: Author,
    pub created: String,
    #[serde(default)]
    pub body: String,
}

// Response envelopes
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
pub struct ChangelogResponse {
    #[serde(default)]
    pub values: Vec<ChangeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

impl RawIssue {
    /// Convenience constructor used by gateways that do not speak JSON.
    pub fn new(key: &str, summary: &str, created: &str, issue_type: &str, status: &str) -> Self {
        Self {
            key: key.to_string(),
            fields: RawIssueFields {
                summary: summary.to_string(),
                description: None,
                created: created.to_string(),
                issue_type: Named { name: issue_type.to_string() },
                status: Named { name: status.to_string() },
            },
        }
    }
}
