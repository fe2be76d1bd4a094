use std::fmt;

/// 検索APIに要求するフィールド
pub const EXPORT_FIELDS: [&str; 15] = [
    "key",
    "summary",
    "status",
    "resolution",
    "resolutiondate",
    "updated",
    "assignee",
    "labels",
    "components",
    // time tracking (issue + aggregates)
    "timeoriginalestimate",
    "timeestimate",
    "timespent",
    "aggregatetimeoriginalestimate",
    "aggregatetimeestimate",
    "aggregatetimespent",
];

/// `updated`で絞り込むときに未完了Issueを選ぶ条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ActiveFilter {
    /// `statusCategory != Done`
    NotDone,
    /// `status NOT IN (Open)`
    NotOpen,
}

impl ActiveFilter {
    pub fn to_jql(self) -> &'static str {
        match self {
            ActiveFilter::NotDone => "statusCategory != Done",
            ActiveFilter::NotOpen => "status NOT IN (Open)",
        }
    }
}

/// 前月の範囲をどの日時フィールドで判定するか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// 前月に解決されたIssue
    Resolved,
    /// 前月に更新された未完了Issue
    Updated(ActiveFilter),
}

impl DateStrategy {
    pub fn date_field(self) -> &'static str {
        match self {
            DateStrategy::Resolved => "resolutiondate",
            DateStrategy::Updated(_) => "updated",
        }
    }

    pub fn is_updated(self) -> bool {
        matches!(self, DateStrategy::Updated(_))
    }
}

impl fmt::Display for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.date_field())
    }
}

/// 前月（startOfMonth(-1) 以上 startOfMonth() 未満）のIssueを選ぶJQLを生成
///
/// 日付の計算はサーバー側のJQL関数に任せる。プロジェクトキーは検証しない。
pub fn prev_month_jql(project_key: &str, strategy: DateStrategy) -> String {
    let condition = match strategy {
        DateStrategy::Resolved => "resolution IS NOT EMPTY",
        DateStrategy::Updated(filter) => filter.to_jql(),
    };
    let field = strategy.date_field();

    format!(
        "project = {project_key} AND {condition} \
         AND {field} >= startOfMonth(-1) AND {field} < startOfMonth() \
         ORDER BY {field} ASC"
    )
}
