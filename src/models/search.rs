use super::Issue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub total: Option<u32>,

    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// GETクエリ用のパラメータ列（`fields`はカンマ区切り）
    pub fn to_query(&self, jql: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![("jql", jql.to_string())];
        if let Some(fields) = &self.fields {
            query.push(("fields", fields.join(",")));
        }
        if let Some(max_results) = self.max_results {
            query.push(("maxResults", max_results.to_string()));
        }
        if let Some(start_at) = self.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        query
    }
}
