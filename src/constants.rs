pub const DEFAULT_JIRA_URL: &str = "https://warthogs.atlassian.net";
pub const CONFIG_FILE: &str = ".jira-summarizer-config.json";

pub const URL_ENV_VAR: &str = "JIRA_SUMMARIZER_JIRA_URL";
pub const USERNAME_ENV_VAR: &str = "JIRA_SUMMARIZER_JIRA_USERNAME";
pub const API_TOKEN_ENV_VAR: &str = "JIRA_SUMMARIZER_JIRA_API_TOKEN";
pub const LOG_ENV_VAR: &str = "JIRA_SUMMARIZER_LOG";

pub const DEFAULT_SINCE: &str = "2w";
pub const DEFAULT_GROUP: &str = "top";

// Fields requested on every issue search
pub const ISSUE_FIELDS: &str = "summary,description,created,issuetype,status";

pub const ASSIGNED_EPICS_JQL: &str =
    "assignee = currentUser() AND issuetype = Epic AND status != Done";

pub const EDITABLE_SEPARATOR: &str = "<----- ANY CONTENTS BELOW THIS WILL BE IGNORED ----->";
pub const FALLBACK_EDITOR: &str = "sensible-editor";

pub const CONFIG_EXAMPLE: &str = r#"{
  "base_url": "https://warthogs.atlassian.net",
  "username": "you@example.com",
  "api_token": "<API token from your Atlassian account>",
  "group": "top",
  "since": "2w"
}"#;
