//! Club CLI (`club`)
//!
//! 회원 디렉터리 데이터와 권한 테이블을 로드해, 특정 조회자 관점에서
//! 프로필 가시성과 작업 권한을 확인하는 운영 도구입니다.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;

use config::Config;
use context::ViewerOptions;

#[derive(Parser)]
#[command(name = "club")]
#[command(author, version, long_about = None)]
#[command(about = "Club CLI - directory visibility and permission inspector")]
struct Cli {
    /// Directory data file (JSON, overrides CLUB_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Capability table file (YAML, overrides CLUB_POLICY_PATH)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Act as this member (anonymous when omitted)
    #[arg(long = "as", global = true)]
    as_id: Option<String>,

    /// Role of the acting member (defaults to the role stored in the data file)
    #[arg(long, global = true)]
    role: Option<String>,

    /// Evaluate the acting member as not authenticated
    #[arg(long, global = true)]
    unauthenticated: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Directory(DirectoryCommands),

    /// Show the effective capability table (no directory data needed)
    Policy,
}

/// 디렉터리 데이터와 조회자가 필요한 명령
#[derive(Subcommand)]
enum DirectoryCommands {
    // ─────────────────────────────────────────────────────────────────────────
    // Directory
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a member profile as the current viewer sees it
    View { id: String },

    /// List all members as the current viewer sees them
    List,

    /// Search the directory (only visible values match)
    Search { query: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Permissions
    // ─────────────────────────────────────────────────────────────────────────
    /// Check a role capability (e.g. `club can rsvps create`)
    Can { resource: String, action: String },

    /// Check whether the viewer may edit or delete a profile
    CanAct { target: String, action: String },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 설정 로드 (CLI 옵션 > 환경변수)
    let config = Config::from_env().with_overrides(cli.data, cli.policy);

    // 로깅 초기화 (stdout은 명령 출력용)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match cli.command {
        Commands::Policy => {
            let table = config.load_table()?;
            return commands::policy::show(&table, cli.format);
        }
        Commands::Directory(command) => command,
    };

    let directory = config.load_directory()?;

    // 조회자 결정
    let viewer = context::resolve_viewer(
        &directory,
        &ViewerOptions {
            as_id: cli.as_id,
            role: cli.role,
            unauthenticated: cli.unauthenticated,
        },
    )?;

    // 명령 실행
    match command {
        DirectoryCommands::View { id } => {
            commands::view::view(&directory, &viewer, &id, cli.format)
        }
        DirectoryCommands::List => commands::view::list(&directory, &viewer, cli.format),
        DirectoryCommands::Search { query } => {
            commands::search::search(&directory, &viewer, &query, cli.format)
        }
        DirectoryCommands::Can { resource, action } => {
            commands::can::can(&directory, &viewer, &resource, &action, cli.format)
        }
        DirectoryCommands::CanAct { target, action } => {
            commands::can::can_act(&directory, &viewer, &target, &action, cli.format)
        }
    }
}
