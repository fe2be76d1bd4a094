use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::humanize::humanize_seconds;
use crate::models::{Issue, Worklog};
use crate::paginate::fetch_worklogs;
use crate::source::IssueSource;

/// エクスポート用に整形したIssue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedIssue {
    pub key: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub resolution: Option<String>,
    #[serde(rename = "resolutiondate")]
    pub resolution_date: Option<String>,
    pub updated: Option<String>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    pub components: Vec<Option<String>>,
    pub time: TimeTracking,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub worklogs: Option<Vec<EnrichedWorklog>>,
}

/// 秒数と整形済み文字列の組（Human側は秒数がnullのときだけnull）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTracking {
    pub original_estimate_seconds: Option<u64>,
    pub original_estimate_human: Option<String>,
    pub remaining_estimate_seconds: Option<u64>,
    pub remaining_estimate_human: Option<String>,
    pub time_spent_seconds: Option<u64>,
    pub time_spent_human: Option<String>,
    pub aggregate_original_estimate_seconds: Option<u64>,
    pub aggregate_original_estimate_human: Option<String>,
    pub aggregate_remaining_estimate_seconds: Option<u64>,
    pub aggregate_remaining_estimate_human: Option<String>,
    pub aggregate_time_spent_seconds: Option<u64>,
    pub aggregate_time_spent_human: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedWorklog {
    pub author: Option<String>,
    pub started: Option<String>,
    pub time_spent_seconds: Option<u64>,
    pub time_spent_human: Option<String>,
    pub comment: Option<String>,
}

/// 生のIssueを出力形式に射影（Worklogは付与しない）
pub fn project_issue(issue: Issue) -> EnrichedIssue {
    let f = issue.fields;

    let time = TimeTracking {
        original_estimate_seconds: f.time_original_estimate,
        original_estimate_human: humanize_seconds(f.time_original_estimate),
        remaining_estimate_seconds: f.time_estimate,
        remaining_estimate_human: humanize_seconds(f.time_estimate),
        time_spent_seconds: f.time_spent,
        time_spent_human: humanize_seconds(f.time_spent),
        aggregate_original_estimate_seconds: f.aggregate_time_original_estimate,
        aggregate_original_estimate_human: humanize_seconds(f.aggregate_time_original_estimate),
        aggregate_remaining_estimate_seconds: f.aggregate_time_estimate,
        aggregate_remaining_estimate_human: humanize_seconds(f.aggregate_time_estimate),
        aggregate_time_spent_seconds: f.aggregate_time_spent,
        aggregate_time_spent_human: humanize_seconds(f.aggregate_time_spent),
    };

    EnrichedIssue {
        key: issue.key,
        summary: f.summary,
        status: f.status.and_then(|s| s.name),
        resolution: f.resolution.and_then(|r| r.name),
        resolution_date: f.resolution_date,
        updated: f.updated,
        assignee: f.assignee.and_then(|u| u.display_name),
        labels: f.labels,
        components: f
            .components
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.name)
            .collect(),
        time,
        worklogs: None,
    }
}

/// Worklogを出力形式に変換
///
/// 所要時間はサーバーの整形済み文字列を優先する。ただし秒数がないときは
/// 整形済み文字列も出さない。コメントは文字列のときだけ残す。
pub fn project_worklog(worklog: Worklog) -> EnrichedWorklog {
    let time_spent_human = worklog.time_spent_seconds.and_then(|_| {
        worklog
            .time_spent
            .filter(|s| !s.is_empty())
            .or_else(|| humanize_seconds(worklog.time_spent_seconds))
    });

    let comment = match worklog.comment {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    };

    EnrichedWorklog {
        author: worklog.author.and_then(|u| u.display_name),
        started: worklog.started,
        time_spent_seconds: worklog.time_spent_seconds,
        time_spent_human,
        comment,
    }
}

/// Issue一覧を入力順のまま整形し、必要ならWorklogを1件ずつ順に取得して付与
pub async fn enrich_issues<S>(
    source: &S,
    issues: Vec<Issue>,
    page_size: u32,
    include_worklogs: bool,
) -> Result<Vec<EnrichedIssue>>
where
    S: IssueSource + ?Sized,
{
    let mut enriched = Vec::with_capacity(issues.len());

    for issue in issues {
        let mut item = project_issue(issue);

        if include_worklogs {
            let worklogs = fetch_worklogs(source, &item.key, page_size).await?;
            item.worklogs = Some(worklogs.into_iter().map(project_worklog).collect());
        }

        enriched.push(item);
    }

    Ok(enriched)
}
