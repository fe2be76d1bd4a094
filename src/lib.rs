pub mod cli;
pub mod client;
pub mod enrich;
pub mod error;
pub mod export;
pub mod humanize;
pub mod models;
pub mod paginate;
pub mod query;
pub mod server;
pub mod source;

pub use client::{Auth, JiraClient, JiraConfig};
pub use error::{Error, Result};
pub use models::*;

pub use enrich::{EnrichedIssue, EnrichedWorklog, TimeTracking, enrich_issues, project_issue, project_worklog};
pub use export::{ExportRequest, ExportSettings, export_issues, to_json, write_json};
pub use humanize::humanize_seconds;
pub use paginate::{DEFAULT_PAGE_SIZE, PageCursor, fetch_all_issues, fetch_worklogs};
pub use query::{ActiveFilter, DateStrategy, EXPORT_FIELDS, prev_month_jql};
pub use source::IssueSource;
