mod render;

use clap::{Parser, Subcommand};
use jinju_common::config::{self, AppConfig};
use jinju_common::history::{self, TeamFilter};
use jinju_common::pipeline;
use jinju_common::storage::StorageGateway;
use jinju_common::DirectiveError;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jinju-directive")]
#[command(about = "진주햄 메시지 분석 - Workers AI message analysis with per-team sheet history")]
struct Cli {
    /// Secrets file (default: $JINJU_SECRETS or ~/.jinju/secrets.toml)
    #[arg(long, global = true)]
    secrets: Option<PathBuf>,

    /// Access password, required when the secrets file sets one
    #[arg(long, env = "JINJU_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a message and save it to the team's sheet
    Analyze {
        /// Team (Brand / Meat / Business, or 브랜드 / 육가공 / 사업관리)
        #[arg(long)]
        team: String,

        /// Message text (read from stdin when omitted)
        #[arg(long)]
        text: Option<String>,

        /// Print the submission as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show saved analyses, newest first
    History {
        /// Team filter (all / 전체 or a team)
        #[arg(long, default_value = "all")]
        team: TeamFilter,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count saved analyses per team
    Stats,
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the info default
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("[jinju] ⚠️ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), DirectiveError> {
    let config = config::load_config(cli.secrets.as_deref())?;

    if !config.check_password(cli.password.as_deref()) {
        return Err(DirectiveError::Configuration(
            "❌ 비밀번호가 올바르지 않습니다.".to_string(),
        ));
    }

    let client = config::build_http_client();

    match cli.command {
        Command::Analyze { team, text, json } => {
            let text = match text {
                Some(t) => t,
                None => read_stdin()?,
            };
            analyze(&client, &config, &team, &text, json).await
        }
        Command::History { team, json } => show_history(&client, &config, team, json).await,
        Command::Stats => show_stats(&client, &config).await,
    }
}

fn read_stdin() -> Result<String, DirectiveError> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| DirectiveError::InvalidInput(format!("Failed to read stdin: {}", e)))?;
    Ok(buf)
}

async fn analyze(
    client: &reqwest::Client,
    config: &AppConfig,
    team: &str,
    text: &str,
    json: bool,
) -> Result<(), DirectiveError> {
    let submission = pipeline::submit(client, config, team, text).await?;

    if json {
        print_json(&submission);
    } else {
        print!("{}", render::submission(&submission));
    }
    Ok(())
}

async fn show_history(
    client: &reqwest::Client,
    config: &AppConfig,
    filter: TeamFilter,
    json: bool,
) -> Result<(), DirectiveError> {
    let records = StorageGateway::new(client, config).load_all().await;
    let view = history::history_view(&records, filter);

    if json {
        print_json(&view);
    } else {
        print!("{}", render::history(&view, filter, records.is_empty()));
    }
    Ok(())
}

async fn show_stats(client: &reqwest::Client, config: &AppConfig) -> Result<(), DirectiveError> {
    let records = StorageGateway::new(client, config).load_all().await;
    print!("{}", render::stats(&records));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e));
    println!("{}", json);
}
