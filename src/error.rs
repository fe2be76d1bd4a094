use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("[{issue_key}] worklog error: {source}")]
    Worklog {
        issue_key: String,
        source: Box<Error>,
    },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Worklog取得エラーとしてIssueキーを付与
    pub fn worklog(issue_key: impl Into<String>, source: Error) -> Self {
        Error::Worklog {
            issue_key: issue_key.into(),
            source: Box::new(source),
        }
    }

    /// 上流APIが返したHTTPステータス（ラップされたエラーも辿る）
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            Error::Worklog { source, .. } => source.status(),
            Error::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// リクエストがタイムアウトしたかどうか
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::RequestFailed(e) => e.is_timeout(),
            Error::Worklog { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
