use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::gateway::{IssueGateway, Selector};
use crate::constants::{ASSIGNED_EPICS_JQL, ISSUE_FIELDS};
use crate::error::{SummarizerError, SummarizerResult};
use crate::models::raw::{ChangelogResponse, CommentsResponse, SearchResponse};
use crate::models::{ChangeEntry, RawComment, RawIssue};
use crate::summarizer_error;

lazy_static! {
    static ref ISSUE_KEY_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*-\d+$").unwrap();
}

/// Jira REST v2 client authenticated with an account email and API token.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(base_url: &str, username: String, api_token: String) -> SummarizerResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| summarizer_error!(ConfigError, "invalid Jira URL {:?}: {}", base_url, e))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            username,
            api_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> SummarizerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::ApiError(format!(
                "GET {} failed with status {}: {}",
                path, status, error_text
            )));
        }

        Ok(response.json::<T>().await?)
    }

    /// Run a JQL search, returning the first page of results.
    pub async fn search(&self, jql: &str) -> SummarizerResult<Vec<RawIssue>> {
        if jql.trim().is_empty() {
            return Err(SummarizerError::InvalidInput("empty JQL query".to_string()));
        }

        let data: SearchResponse = self
            .get("/rest/api/2/search", &[("jql", jql), ("fields", ISSUE_FIELDS)])
            .await?;
        Ok(data.issues)
    }
}

/// JQL selecting exactly `keys`. Anything that is not a `PROJ-123` key is
/// rejected rather than spliced into the query.
pub fn keys_jql(keys: &[String]) -> SummarizerResult<String> {
    if keys.is_empty() {
        return Err(summarizer_error!(InvalidInput, "no issue keys given to query"));
    }
    if let Some(bad) = keys.iter().find(|key| !ISSUE_KEY_RE.is_match(key)) {
        return Err(summarizer_error!(InvalidInput, "not an issue key: {:?}", bad));
    }
    Ok(format!("key in ({})", keys.join(", ")))
}

pub fn children_jql(parent_key: &str) -> String {
    format!("parent = {}", parent_key)
}

#[async_trait]
impl IssueGateway for JiraClient {
    async fn query_top_level(&self, selector: &Selector) -> SummarizerResult<Vec<RawIssue>> {
        let jql = match selector {
            Selector::AssignedEpics => ASSIGNED_EPICS_JQL.to_string(),
            Selector::Keys(keys) => keys_jql(keys)?,
        };
        self.search(&jql).await
    }

    async fn query_children(&self, parent_key: &str) -> SummarizerResult<Vec<RawIssue>> {
        self.search(&children_jql(parent_key)).await
    }

    async fn fetch_change_history(&self, key: &str) -> SummarizerResult<Vec<ChangeEntry>> {
        let data: ChangelogResponse = self
            .get(&format!("/rest/api/2/issue/{}/changelog", key), &[])
            .await?;
        Ok(data.values)
    }

    async fn fetch_comments(&self, key: &str) -> SummarizerResult<Vec<RawComment>> {
        let data: CommentsResponse = self
            .get(&format!("/rest/api/2/issue/{}/comment", key), &[])
            .await?;
        Ok(data.comments)
    }

    async fn post_comment(&self, key: &str, text: &str) -> SummarizerResult<()> {
        let url = format!("{}/rest/api/2/issue/{}/comment", self.base_url, key);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .json(&json!({ "body": text }))
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::ApiError(format!(
                "failed to post comment on issue {} (status {}): {}",
                key, status, error_text
            )));
        }

        Ok(())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}
