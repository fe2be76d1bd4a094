use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::{Auth, JiraClient, JiraConfig};
use crate::error::{Error, Result};
use crate::export::{ExportRequest, ExportSettings, export_issues, to_json, write_json};
use crate::query::{ActiveFilter, DateStrategy};

/// Export last month's Jira issues as JSON
#[derive(Debug, clap::Parser)]
#[command(name = "jira-export", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[clap(flatten)]
    pub global: GlobalOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GlobalOptions {
    /// Number of records requested per page
    #[clap(long, env = "JIRA_PAGE_SIZE", global = true, default_value = "100")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[clap(long, env = "JIRA_TIMEOUT_SECS", global = true, default_value = "30")]
    pub timeout_secs: u64,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Write the previous month's issues to a JSON file
    #[clap(name = "export")]
    Export(ExportArgs),

    /// Serve the export form over HTTP
    #[clap(name = "serve")]
    Serve(ServeArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Jira base URL (e.g. https://jira.example.com:8443)
    #[arg(long, env = "JIRA_URL")]
    pub base_url: String,

    /// Project key (e.g. ARAPS)
    #[arg(long, env = "JIRA_PROJECT")]
    pub project: String,

    /// Output JSON file
    #[arg(long)]
    pub output: PathBuf,

    /// Jira login (prompted when omitted)
    #[arg(long, env = "JIRA_USER")]
    pub username: Option<String>,

    /// Jira password (prompted without echo when omitted)
    #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Select on last update instead of resolution date (less strict)
    #[arg(long)]
    pub use_updated: bool,

    /// Which unfinished issues --use-updated keeps
    #[arg(long, value_enum, default_value = "not-open")]
    pub active_filter: ActiveFilter,

    /// Do not fetch worklogs for each issue
    #[arg(long)]
    pub skip_worklogs: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "JIRA_EXPORT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "JIRA_EXPORT_PORT", default_value = "5000")]
    pub port: u16,
}

impl GlobalOptions {
    pub fn settings(&self) -> ExportSettings {
        ExportSettings::new()
            .page_size(self.page_size)
            .timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl ExportArgs {
    pub fn strategy(&self) -> DateStrategy {
        if self.use_updated {
            DateStrategy::Updated(self.active_filter)
        } else {
            DateStrategy::Resolved
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.global.settings();

    match cli.command {
        Commands::Export(args) => {
            let username = match provided(args.username.as_deref()) {
                Some(username) => username,
                None => prompt_username()?,
            };
            let password = match provided(args.password.as_deref()) {
                Some(password) => password,
                None => rpassword::prompt_password("Jira password (hidden): ")?,
            };
            let count = run_export(&args, username, password, &settings).await?;
            println!("OK - {} issues exported to {}", count, args.output.display());
            Ok(())
        }
        Commands::Serve(args) => {
            let addr = format!("{}:{}", args.host, args.port);
            crate::server::serve(&addr, settings).await
        }
    }
}

/// 資格情報が揃った状態でエクスポートを実行し、書き出した件数を返す
pub async fn run_export(
    args: &ExportArgs,
    username: String,
    password: String,
    settings: &ExportSettings,
) -> Result<usize> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(Error::MissingParameter("username".to_string()));
    }
    if password.is_empty() {
        return Err(Error::MissingParameter("password".to_string()));
    }

    let settings = settings.clone().include_worklogs(!args.skip_worklogs);
    let request = ExportRequest::new(args.project.as_str(), args.strategy())?;
    let config = JiraConfig::new(args.base_url.trim(), Auth::Basic { username, password })?
        .with_timeout(settings.timeout);
    let client = JiraClient::new(config)?;

    let issues = export_issues(&client, &request, &settings).await?;
    let json = to_json(&issues)?;
    write_json(&args.output, &json).await?;

    Ok(issues.len())
}

/// 空文字のフラグ値は未指定として扱い、プロンプトに回す
fn provided(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn prompt_username() -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Jira login: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
