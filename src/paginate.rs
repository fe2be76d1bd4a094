use crate::error::{Error, Result};
use crate::models::{Issue, SearchParams, Worklog};
use crate::source::IssueSource;

/// 1ページあたりの取得件数
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// startAt/maxResults 方式のページングカーソル
///
/// `total`は最初のレスポンスの値で固定する。以降のページで値が変わっても
/// 取得範囲は広げず、警告だけを出す。
#[derive(Debug, Clone, Default)]
pub struct PageCursor {
    start_at: u32,
    total: Option<u32>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次に要求するオフセット
    pub fn start_at(&self) -> u32 {
        self.start_at
    }

    /// 最初のページで確定した総件数
    pub fn total(&self) -> Option<u32> {
        self.total
    }

    /// 受信したバッチを反映し、続きを取得すべきならtrueを返す
    pub fn advance(&mut self, batch_len: usize, reported_total: Option<u32>) -> bool {
        let batch_len = u32::try_from(batch_len).unwrap_or(u32::MAX);

        let total = match self.total {
            Some(total) => {
                if let Some(reported) = reported_total {
                    if reported != total {
                        tracing::warn!(
                            first_total = total,
                            reported_total = reported,
                            start_at = self.start_at,
                            "total changed between pages, keeping the first value"
                        );
                    }
                }
                total
            }
            None => *self.total.insert(reported_total.unwrap_or(batch_len)),
        };

        self.start_at = self.start_at.saturating_add(batch_len);

        if batch_len == 0 {
            if self.start_at < total {
                tracing::warn!(
                    start_at = self.start_at,
                    total,
                    "empty page before reaching total, stopping pagination"
                );
            }
            return false;
        }

        self.start_at < total
    }
}

/// JQLに一致する全Issueをページングしながら取得
pub async fn fetch_all_issues<S>(
    source: &S,
    jql: &str,
    fields: &[&str],
    page_size: u32,
) -> Result<Vec<Issue>>
where
    S: IssueSource + ?Sized,
{
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    let mut issues = Vec::new();
    let mut cursor = PageCursor::new();

    loop {
        let params = SearchParams::new()
            .fields(fields.clone())
            .max_results(page_size)
            .start_at(cursor.start_at());

        let page = source.search_issues(jql, params).await?;
        let batch_len = page.issues.len();
        tracing::debug!(start_at = cursor.start_at(), batch_len, total = ?page.total, "fetched issue page");

        issues.extend(page.issues);
        if !cursor.advance(batch_len, page.total) {
            break;
        }
    }

    tracing::debug!(count = issues.len(), total = ?cursor.total(), "issue search complete");
    Ok(issues)
}

/// 1件のIssueの全Worklogを取得（失敗時はIssueキー付きのエラー）
pub async fn fetch_worklogs<S>(source: &S, issue_key: &str, page_size: u32) -> Result<Vec<Worklog>>
where
    S: IssueSource + ?Sized,
{
    let mut worklogs = Vec::new();
    let mut cursor = PageCursor::new();

    loop {
        let page = source
            .get_worklogs(issue_key, cursor.start_at(), page_size)
            .await
            .map_err(|e| Error::worklog(issue_key, e))?;
        let batch_len = page.worklogs.len();
        tracing::debug!(%issue_key, start_at = cursor.start_at(), batch_len, "fetched worklog page");

        worklogs.extend(page.worklogs);
        if !cursor.advance(batch_len, page.total) {
            break;
        }
    }

    Ok(worklogs)
}
