use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub content: String,
    pub author: String,
    pub created_at: DateTime<FixedOffset>,
}
