//! フォームからエクスポートをダウンロードするWebサーフェス
//!
//! リクエストごとに資格情報から`JiraClient`を作り、パイプラインを独立して実行する。
//! ルーター状態は読み取り専用の設定だけを持つ。

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::client::{Auth, JiraClient, JiraConfig};
use crate::error::{Error, Result};
use crate::export::{ExportRequest, ExportSettings, export_issues, to_json};
use crate::query::{ActiveFilter, DateStrategy};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Clone)]
pub struct AppState {
    settings: Arc<ExportSettings>,
}

pub fn router(settings: ExportSettings) -> Router {
    let state = AppState {
        settings: Arc::new(settings),
    };

    Router::new()
        .route("/", get(index))
        .route("/export", post(export))
        .route("/ping", get(ping))
        .with_state(state)
}

/// 指定アドレスで待ち受け、終了まで処理を続ける
pub async fn serve(addr: &str, settings: ExportSettings) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(settings)).await?;
    Ok(())
}

/// `POST /export` のフォーム
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportForm {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// チェックボックス（"on"）
    #[serde(default)]
    pub use_updated: Option<String>,
}

impl ExportForm {
    /// 必須項目を検証し、接続設定とエクスポート対象に分解する
    pub fn into_parts(self) -> Result<(JiraConfig, ExportRequest)> {
        let base_url = required(self.base_url.as_deref().map(str::trim), "baseUrl")?;
        let project_key = required(self.project_key.as_deref().map(str::trim), "projectKey")?;
        let username = required(self.username.as_deref().map(str::trim), "username")?;
        let password = required(self.password.as_deref(), "password")?;

        let strategy = if is_checked(self.use_updated.as_deref()) {
            DateStrategy::Updated(ActiveFilter::NotDone)
        } else {
            DateStrategy::Resolved
        };

        let config = JiraConfig::new(base_url, Auth::Basic { username, password })?;
        let request = ExportRequest::new(project_key, strategy)?;
        Ok((config, request))
    }
}

fn required(value: Option<&str>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::MissingParameter(name.to_string())),
    }
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true" | "1"))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ping() -> &'static str {
    "pong"
}

async fn export(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> std::result::Result<Response, AppError> {
    let (config, request) = form.into_parts()?;
    let disposition = attachment_header(&request)?;
    let client = JiraClient::new(config.with_timeout(state.settings.timeout))?;

    let issues = export_issues(&client, &request, &state.settings).await?;
    let body = to_json(&issues)?;
    tracing::info!(project = %request.project_key, count = issues.len(), "export sent");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// ダウンロード用の`Content-Disposition`（ヘッダーに使えないキーは400）
fn attachment_header(request: &ExportRequest) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", request.filename()))
        .map_err(|_| Error::InvalidInput("project key cannot be used in a file name".to_string()))
}

/// パイプラインのエラーをHTTPレスポンスに変換
#[derive(Debug)]
pub struct AppError(Error);

impl From<Error> for AppError {
    fn from(error: Error) -> Self {
        AppError(error)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::MissingParameter(_) | Error::InvalidInput(_) | Error::InvalidConfiguration(_) => {
                StatusCode::BAD_REQUEST
            }
            e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            e => match e.status() {
                Some(code) => StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
                None if matches!(e, Error::RequestFailed(_) | Error::Worklog { .. }) => {
                    StatusCode::BAD_GATEWAY
                }
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> String {
        match &self.0 {
            // 上流の本文をそのまま返す
            Error::ApiError { message, .. } => message.clone(),
            e => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "export failed");
        } else {
            tracing::warn!(%status, error = %self.0, "export rejected");
        }
        (status, self.body()).into_response()
    }
}
