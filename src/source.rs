use async_trait::async_trait;

use crate::error::Result;
use crate::models::{SearchParams, SearchResult, WorklogResult};
use crate::JiraClient;

/// エクスポートパイプラインが参照する上流データの抽象化トレイト
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// JQLで1ページ分のIssueを取得
    async fn search_issues(&self, jql: &str, params: SearchParams) -> Result<SearchResult>;

    /// 1件のIssueのWorklogを1ページ分取得
    async fn get_worklogs(&self, issue_key: &str, start_at: u32, max_results: u32) -> Result<WorklogResult>;
}

#[async_trait]
impl IssueSource for JiraClient {
    async fn search_issues(&self, jql: &str, params: SearchParams) -> Result<SearchResult> {
        JiraClient::search_issues(self, jql, params).await
    }

    async fn get_worklogs(&self, issue_key: &str, start_at: u32, max_results: u32) -> Result<WorklogResult> {
        JiraClient::get_worklogs(self, issue_key, start_at, max_results).await
    }
}
