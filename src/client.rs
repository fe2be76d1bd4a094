use crate::error::Result;
use crate::models::{SearchParams, SearchResult, WorklogResult};
use base64::Engine;
use reqwest::{Client, header};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// 1リクエストあたりの待ち時間の上限
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub enum Auth {
    Basic { username: String, password: String },
}

// パスワードはログやデバッグ出力に出さない
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub auth: Auth,
    pub timeout: Duration,
}

impl JiraConfig {
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        let base_url = base_url.into();

        // Validate URL
        let _ = Url::parse(&base_url)
            .map_err(|_| crate::error::Error::InvalidConfiguration("Invalid base URL".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    pub(crate) client: Client,
    pub(crate) config: Arc<JiraConfig>,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        // 認証ヘッダーを追加（URLに資格情報を埋め込まない）
        match &config.auth {
            Auth::Basic { username, password } => {
                let auth_value = format!("{}:{}", username, password);
                let encoded = base64::engine::general_purpose::STANDARD.encode(auth_value.as_bytes());
                let mut value = header::HeaderValue::from_str(&format!("Basic {}", encoded))
                    .map_err(|_| crate::error::Error::InvalidConfiguration("Invalid auth header".to_string()))?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| crate::error::Error::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub(crate) async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);
        tracing::debug!(%endpoint, ?query, "GET");

        let response = self.client
            .get(&url)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(crate::error::Error::ApiError { status, message });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    pub async fn search_issues(&self, jql: &str, params: SearchParams) -> Result<SearchResult> {
        self.get("/rest/api/2/search", &params.to_query(jql)).await
    }

    pub async fn get_worklogs(&self, issue_key: &str, start_at: u32, max_results: u32) -> Result<WorklogResult> {
        let endpoint = format!("/rest/api/2/issue/{}/worklog", urlencoding::encode(issue_key));
        let query = [
            ("startAt", start_at.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        self.get(&endpoint, &query).await
    }
}
