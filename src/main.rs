mod cmd;
mod config;
mod context;
mod diff;
mod domain;
mod error;
mod fold;
mod infra;
mod normalize;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::LevelFilter;

use crate::cmd::commit::{self, CommitCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::git::{FixedDiff, GitCli};
use crate::infra::llm::{CannedGenerator, OpenAiClient};
use crate::services::{LanguageModelService, VersionControlService};

#[derive(Parser)]
#[command(
    name = "commitgen",
    author,
    version,
    about = "Generate a conventional commit message for staged changes"
)]
struct Cli {
    /// Print the generated message without committing.
    #[arg(long)]
    dry_run: bool,

    /// Commit without asking for confirmation.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Read the diff from a file instead of the staged changes.
    #[arg(long, value_name = "PATH")]
    diff_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load()?;

    let version_control: Arc<dyn VersionControlService> = match (&cli.diff_file, config.mock_git) {
        (Some(path), _) => Arc::new(FixedDiff::from_file(path)?),
        (None, true) => Arc::new(FixedDiff::sample()),
        (None, false) => {
            which::which("git").map_err(|_| {
                AppError::Configuration("git is not installed or not on PATH".to_string())
            })?;
            Arc::new(GitCli::new())
        }
    };

    let language_model: Arc<dyn LanguageModelService> = if config.mock_llm {
        Arc::new(CannedGenerator::new())
    } else {
        let api_key = config.openai_api_key.clone().ok_or_else(|| {
            AppError::Configuration("OPENAI_API_KEY environment variable is not set".to_string())
        })?;
        Arc::new(OpenAiClient::new(
            api_key,
            config.model.clone(),
            config.max_tokens,
        ))
    };

    // A file-sourced diff is for inspection, never for committing.
    let dry_run = cli.dry_run || cli.diff_file.is_some();

    let context = AppContext::new(config, version_control, language_model);
    commit::run(
        &context,
        CommitCommandArgs {
            dry_run,
            assume_yes: cli.yes,
        },
    )
    .await
}
