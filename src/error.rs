use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("Missing Jira credentials.\n{0}")]
    MissingCredentials(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("failed to build issue {key}: {source}")]
    Issue {
        key: String,
        #[source]
        source: Box<SummarizerError>,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("Editor error: {0}")]
    EditorError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SummarizerError {
    /// Attach the key of the issue whose build failed.
    ///
    /// Errors already carrying a key keep the innermost one, and cancellations
    /// stay bare so the first real failure is what surfaces.
    pub fn for_issue(self, key: &str) -> Self {
        match self {
            SummarizerError::Issue { .. } | SummarizerError::Cancelled => self,
            other => SummarizerError::Issue {
                key: key.to_string(),
                source: Box::new(other),
            },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SummarizerError::Cancelled)
    }
}

pub type SummarizerResult<T> = Result<T, SummarizerError>;

/// Describe what was being attempted when a lower-level error occurred.
///
/// The original error stays reachable through `Error::source`.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> SummarizerResult<T>;
    fn with_context<F>(self, f: F) -> SummarizerResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> SummarizerResult<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> SummarizerResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SummarizerError::Context {
            context: f(),
            source: Box::new(e),
        })
    }
}

#[macro_export]
macro_rules! summarizer_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::SummarizerError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::SummarizerError::$error_type(format!($fmt, $($arg)*))
    };
}
