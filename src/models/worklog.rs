use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worklog {
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(rename = "timeSpentSeconds")]
    #[serde(default)]
    pub time_spent_seconds: Option<u64>,
    /// サーバー側で整形済みの所要時間（例: "1d 2h"）
    #[serde(rename = "timeSpent")]
    #[serde(default)]
    pub time_spent: Option<String>,
    /// 文字列またはADF形式のオブジェクト
    #[serde(default)]
    pub comment: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorklogResult {
    #[serde(default)]
    pub total: Option<u32>,

    #[serde(default)]
    pub worklogs: Vec<Worklog>,
}
