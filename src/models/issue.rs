use serde::{Deserialize, Serialize};

/// 検索APIが返すIssue（エクスポートに必要なフィールドのみ）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    // 日時文字列はサーバーの書式のまま出力する
    #[serde(rename = "resolutiondate")]
    #[serde(default)]
    pub resolution_date: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub components: Option<Vec<Component>>,

    // タイムトラッキング（秒）
    #[serde(rename = "timeoriginalestimate")]
    #[serde(default)]
    pub time_original_estimate: Option<u64>,
    #[serde(rename = "timeestimate")]
    #[serde(default)]
    pub time_estimate: Option<u64>,
    #[serde(rename = "timespent")]
    #[serde(default)]
    pub time_spent: Option<u64>,
    #[serde(rename = "aggregatetimeoriginalestimate")]
    #[serde(default)]
    pub aggregate_time_original_estimate: Option<u64>,
    #[serde(rename = "aggregatetimeestimate")]
    #[serde(default)]
    pub aggregate_time_estimate: Option<u64>,
    #[serde(rename = "aggregatetimespent")]
    #[serde(default)]
    pub aggregate_time_spent: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: Option<String>,
}

use super::{Status, User};
