use serde::{Deserialize, Serialize};

/// 担当者・Worklog作成者（出力には表示名だけを使う）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "displayName")]
    #[serde(default)]
    pub display_name: Option<String>,
}
