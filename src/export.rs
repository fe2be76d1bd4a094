use std::path::Path;
use std::time::Duration;

use crate::client::DEFAULT_TIMEOUT;
use crate::enrich::{EnrichedIssue, enrich_issues};
use crate::error::{Error, Result};
use crate::paginate::{DEFAULT_PAGE_SIZE, fetch_all_issues};
use crate::query::{DateStrategy, EXPORT_FIELDS, prev_month_jql};
use crate::source::IssueSource;

/// 1回のエクスポートで共通の設定
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// 検索・Worklogの1ページあたりの件数
    pub page_size: u32,
    /// 上流への1リクエストあたりのタイムアウト
    pub timeout: Duration,
    /// Issueごとに全Worklogを付与するか
    pub include_worklogs: bool,
}

impl ExportSettings {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            include_worklogs: true,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn include_worklogs(mut self, include: bool) -> Self {
        self.include_worklogs = include;
        self
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// エクスポート対象（プロジェクトと期間の判定方法）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub project_key: String,
    pub strategy: DateStrategy,
}

impl ExportRequest {
    pub fn new(project_key: impl Into<String>, strategy: DateStrategy) -> Result<Self> {
        let project_key = project_key.into().trim().to_string();
        if project_key.is_empty() {
            return Err(Error::MissingParameter("projectKey".to_string()));
        }
        Ok(Self { project_key, strategy })
    }

    pub fn jql(&self) -> String {
        prev_month_jql(&self.project_key, self.strategy)
    }

    /// ダウンロード時のファイル名
    pub fn filename(&self) -> String {
        let suffix = if self.strategy.is_updated() { "_updated" } else { "" };
        format!("jira_{}_prev_month{}.json", self.project_key, suffix)
    }
}

/// 検索 → 整形 → Worklog付与までを実行
///
/// どこかで失敗した時点で中断し、部分的な結果は返さない。
pub async fn export_issues<S>(
    source: &S,
    request: &ExportRequest,
    settings: &ExportSettings,
) -> Result<Vec<EnrichedIssue>>
where
    S: IssueSource + ?Sized,
{
    let jql = request.jql();
    tracing::info!(project = %request.project_key, strategy = %request.strategy, %jql, "searching issues");

    let issues = fetch_all_issues(source, &jql, &EXPORT_FIELDS, settings.page_size).await?;
    tracing::info!(count = issues.len(), include_worklogs = settings.include_worklogs, "enriching issues");

    enrich_issues(source, issues, settings.page_size, settings.include_worklogs).await
}

/// 2スペースインデント、非ASCII文字はエスケープしない
pub fn to_json(issues: &[EnrichedIssue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}

pub async fn write_json(path: impl AsRef<Path>, json: &str) -> Result<()> {
    tokio::fs::write(path.as_ref(), json.as_bytes()).await?;
    Ok(())
}
