//! Command-line client for a team's task board.
//!
//! Usage:
//!
//! ```text
//! taskboard [--api-url URL] [--token TOKEN] [--json] teams
//! taskboard [--api-url URL] [--token TOKEN] [--json] show [--team ID] [--assignee ID]
//! taskboard [--api-url URL] [--token TOKEN] move --team ID --task ID --status STATUS
//! ```
//!
//! Connection settings fall back to `TASKBOARD_API_URL`, `TASKBOARD_TOKEN`
//! and `TASKBOARD_TIMEOUT_SECS`. Logging is controlled by `RUST_LOG` and
//! defaults to `warn`.

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::board::{
    adapters::{credentials::StaticToken, http::HttpBoardApi, log_sink::TracingNoticeSink},
    domain::{BoardView, TaskId, TaskStatus, TeamId, TeamMember, UserId},
    ports::ApiError,
    services::{BoardError, MoveOutcome, TaskBoardController},
};
use taskboard::config::{ClientConfig, ConfigError};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type Controller = TaskBoardController<HttpBoardApi<StaticToken>, TracingNoticeSink, DefaultClock>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no team available; pass --team")]
    NoTeam,
}

#[derive(Debug, Parser)]
#[command(name = "taskboard", about = "Inspect and update a team task board")]
struct Cli {
    /// REST base URL of the portal backend.
    #[arg(long, global = true, env = "TASKBOARD_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the backend.
    #[arg(long, global = true, env = "TASKBOARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the teams whose boards you can open.
    Teams,
    /// Print the board columns.
    Show {
        /// Team to show; defaults to the first accessible team.
        #[arg(long)]
        team: Option<u64>,
        /// Only show tasks assigned to this user.
        #[arg(long)]
        assignee: Option<u64>,
    },
    /// Move a task to another column.
    Move {
        /// Team owning the task.
        #[arg(long)]
        team: u64,
        /// Task to move.
        #[arg(long)]
        task: u64,
        /// Destination column: TODO, IN_PROGRESS, REVIEW or DONE.
        #[arg(long, value_parser = parse_status)]
        status: TaskStatus,
    },
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::try_from(raw).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    init_tracing();
    let Err(err) = run(Cli::parse()) else {
        return ExitCode::SUCCESS;
    };
    tracing::error!(error = %err, "taskboard failed");
    let _written = writeln!(io::stderr(), "error: {err}");
    ExitCode::FAILURE
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = ClientConfig::new(url)?.with_timeout(config.timeout());
    }
    if let Some(token) = cli.token.as_deref() {
        config = config.with_token(token);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let credentials = config
        .token()
        .map_or_else(StaticToken::signed_out, StaticToken::new);
    let api = HttpBoardApi::new(&config, Arc::new(credentials))?;
    let controller: Controller = TaskBoardController::new(
        Arc::new(api),
        Arc::new(TracingNoticeSink),
        Arc::new(DefaultClock),
    );

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    runtime.block_on(execute(&controller, &config, cli))
}

async fn execute(controller: &Controller, config: &ClientConfig, cli: Cli) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Teams => {
            let teams = controller.available_teams().await?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&teams)?).map_err(CliError::Output)?;
            } else {
                for team in teams {
                    writeln!(out, "{}\t{}", team.id, team.name).map_err(CliError::Output)?;
                }
            }
        }
        Command::Show { team, assignee } => {
            let opened = controller.open(team.map(TeamId::new)).await?;
            if opened.is_none() {
                return Err(CliError::NoTeam);
            }
            controller.filter_by_assignee(assignee.map(UserId::new));
            let view = controller.visible_tasks();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?).map_err(CliError::Output)?;
            } else {
                render_view(&mut out, &view, &controller.members(), &config.asset_origin())
                    .map_err(CliError::Output)?;
            }
        }
        Command::Move { team, task, status } => {
            controller.select_team(TeamId::new(team)).await?;
            let outcome = controller.move_task(TaskId::new(task), status).await?;
            let summary = match outcome {
                MoveOutcome::Persisted => format!("task {task} moved to {status}"),
                MoveOutcome::Ignored(reason) => format!("task {task} not moved: {reason:?}"),
                MoveOutcome::Coalesced | MoveOutcome::Discarded => {
                    format!("task {task} move superseded")
                }
            };
            writeln!(out, "{summary}").map_err(CliError::Output)?;
        }
    }
    Ok(())
}

fn render_view(
    out: &mut impl Write,
    view: &BoardView,
    members: &[TeamMember],
    asset_origin: &str,
) -> io::Result<()> {
    for column in view.columns() {
        writeln!(out, "{} ({})", column.status(), column.len())?;
        for task in column.tasks() {
            let assignee = task
                .assignee_id()
                .and_then(|id| members.iter().find(|member| member.id() == id))
                .map_or_else(|| "unassigned".to_owned(), |member| member.full_name().to_owned());
            let due = task
                .due_date()
                .map_or_else(|| "--".to_owned(), |date| date.format("%Y-%m-%d").to_string());
            writeln!(
                out,
                "  #{} [{}] {} ({assignee}, due {due})",
                task.id(),
                task.priority(),
                task.title()
            )?;
        }
    }
    if !members.is_empty() {
        writeln!(out, "members:")?;
        for member in members {
            let avatar = member
                .resolved_avatar_url(asset_origin)
                .unwrap_or_else(|| "-".to_owned());
            writeln!(out, "  {}\t{}\t{avatar}", member.id(), member.full_name())?;
        }
    }
    Ok(())
}
