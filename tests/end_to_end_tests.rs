/// エクスポートパイプラインのエンドツーエンドテスト
///
/// wiremockで検索APIとWorklog APIを模し、
/// JQL生成 → ページング取得 → 整形 → JSON出力までを通しで検証します。

use jira_export::cli::{Cli, Commands, run_export};
use jira_export::{
    ActiveFilter, Auth, DateStrategy, ExportRequest, ExportSettings, JiraClient, JiraConfig,
    export_issues, to_json,
};
use clap::Parser;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// テスト用のIssue JSONを生成する関数
fn issue_json(n: u32) -> Value {
    json!({
        "id": (10000 + n).to_string(),
        "key": format!("ARAPS-{}", n),
        "fields": {
            "summary": format!("Issue {}", n),
            "status": { "name": "Closed" },
            "resolution": { "name": "Fixed" },
            "resolutiondate": "2024-05-14T10:12:00.000+0200",
            "updated": "2024-05-15T08:00:00.000+0200",
            "assignee": { "displayName": "Jane Doe" },
            "labels": [],
            "components": [{ "name": "API" }],
            "timeoriginalestimate": 7200,
            "timeestimate": null,
            "timespent": 90000,
            "aggregatetimeoriginalestimate": 7200,
            "aggregatetimeestimate": null,
            "aggregatetimespent": 90000
        }
    })
}

fn search_page(start_at: u32, count: u32, total: u32) -> Value {
    let issues: Vec<Value> = (start_at..start_at + count).map(|n| issue_json(n + 1)).collect();
    json!({
        "startAt": start_at,
        "maxResults": 100,
        "total": total,
        "issues": issues
    })
}

fn client_for(server: &MockServer) -> JiraClient {
    let config = JiraConfig::new(
        server.uri(),
        Auth::Basic {
            username: "jdoe".to_string(),
            password: "secret".to_string(),
        },
    )
    .unwrap();
    JiraClient::new(config).unwrap()
}

async fn mount_search_pages(server: &MockServer, pages: &[(u32, u32)], total: u32) {
    for &(start_at, count) in pages {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("startAt", start_at.to_string()))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(start_at, count, total)))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_export_paginates_through_all_pages() {
    // Given: 250件を100件ずつ返す検索API
    let server = MockServer::start().await;
    mount_search_pages(&server, &[(0, 100), (100, 100), (200, 50)], 250).await;

    let client = client_for(&server);
    let request = ExportRequest::new("ARAPS", DateStrategy::Resolved).unwrap();
    let settings = ExportSettings::new().include_worklogs(false);

    // When: エクスポートを実行
    let issues = export_issues(&client, &request, &settings).await.unwrap();

    // Then: 3回のリクエストで250件が順序どおりに揃う
    assert_eq!(issues.len(), 250);
    for (i, issue) in issues.iter().enumerate() {
        assert_eq!(issue.key, format!("ARAPS-{}", i + 1));
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_export_sends_jql_and_field_list() {
    // Given: JQLとfieldsを検証する検索API
    let server = MockServer::start().await;
    let request = ExportRequest::new("ARAPS", DateStrategy::Updated(ActiveFilter::NotOpen)).unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("jql", request.jql()))
        .and(query_param(
            "fields",
            "key,summary,status,resolution,resolutiondate,updated,assignee,labels,components,\
             timeoriginalestimate,timeestimate,timespent,\
             aggregatetimeoriginalestimate,aggregatetimeestimate,aggregatetimespent",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 0, 0)))
        .expect(1)
        .mount(&server)
        .await;

    // When: エクスポートを実行
    let issues = export_issues(&client_for(&server), &request, &ExportSettings::new())
        .await
        .unwrap();

    // Then: 0件で、Worklog APIは呼ばれない
    assert!(issues.is_empty());
    assert!(request.jql().contains("status NOT IN (Open)"));
}

#[tokio::test]
async fn test_export_attaches_worklogs_per_issue() {
    // Given: 1件ずつ返す検索APIと、2ページに分かれたWorklog
    let server = MockServer::start().await;
    for start_at in 0..2u32 {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("startAt", start_at.to_string()))
            .and(query_param("maxResults", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(start_at, 1, 2)))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/ARAPS-1/worklog"))
        .and(query_param("startAt", "0"))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 1,
            "total": 2,
            "worklogs": [{
                "author": { "displayName": "Jane Doe" },
                "started": "2024-05-02T09:00:00.000+0200",
                "timeSpent": "1h 30m",
                "timeSpentSeconds": 5400,
                "comment": "Analyse"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/ARAPS-1/worklog"))
        .and(query_param("startAt", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 1,
            "maxResults": 1,
            "total": 2,
            "worklogs": [{
                "author": { "displayName": "John Roe" },
                "started": "2024-05-03T09:00:00.000+0200",
                "timeSpentSeconds": 86400,
                "comment": { "type": "doc", "version": 1, "content": [] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/ARAPS-2/worklog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 1,
            "total": 0,
            "worklogs": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ExportRequest::new("ARAPS", DateStrategy::Resolved).unwrap();
    let settings = ExportSettings::new().page_size(1);

    // When: Worklog付きでエクスポート
    let issues = export_issues(&client_for(&server), &request, &settings).await.unwrap();

    // Then: Issueごとに全Worklogが整形されて付く
    assert_eq!(issues.len(), 2);
    let worklogs = issues[0].worklogs.as_ref().unwrap();
    assert_eq!(worklogs.len(), 2);
    assert_eq!(worklogs[0].author.as_deref(), Some("Jane Doe"));
    assert_eq!(worklogs[0].time_spent_human.as_deref(), Some("1h 30m"));
    assert_eq!(worklogs[0].comment.as_deref(), Some("Analyse"));
    assert_eq!(worklogs[1].time_spent_human.as_deref(), Some("1 day"));
    assert_eq!(worklogs[1].comment, None);
    assert!(issues[1].worklogs.as_ref().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_json_is_deterministic() {
    // Given: 固定データを返す検索API
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 3, 3)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ExportRequest::new("ARAPS", DateStrategy::Resolved).unwrap();
    let settings = ExportSettings::new().include_worklogs(false);

    // When: 2回エクスポート
    let first = to_json(&export_issues(&client, &request, &settings).await.unwrap()).unwrap();
    let second = to_json(&export_issues(&client, &request, &settings).await.unwrap()).unwrap();

    // Then: バイト単位で一致する
    assert_eq!(first, second);

    let value: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value[0]["time"]["timeSpentHuman"], "1 day, 1 hour");
    assert_eq!(value[0]["time"]["remainingEstimateHuman"], Value::Null);
    assert_eq!(value[0]["components"], json!(["API"]));
}

#[tokio::test]
async fn test_cli_export_writes_file() {
    // Given: 1件のIssueを返す検索APIと出力先
    let server = MockServer::start().await;
    mount_search_pages(&server, &[(0, 1)], 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("jira_ARAPS_prev_month.json");
    let output_arg = output.to_string_lossy().to_string();
    let base_url = server.uri();

    let cli = Cli::try_parse_from([
        "jira-export",
        "export",
        "--base-url",
        base_url.as_str(),
        "--project",
        "ARAPS",
        "--output",
        output_arg.as_str(),
        "--skip-worklogs",
    ])
    .unwrap();
    let settings = cli.global.settings();
    let Commands::Export(args) = cli.command else {
        panic!("Expected export command");
    };

    // When: CLIのエクスポートを実行
    let count = run_export(&args, "jdoe".to_string(), "secret".to_string(), &settings)
        .await
        .unwrap();

    // Then: JSON配列がファイルに書かれる
    assert_eq!(count, 1);
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 1);
    assert_eq!(written[0]["key"], "ARAPS-1");
    assert!(written[0].get("worklogs").is_none());
}
