//! easycommit - CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use easycommit::git::check_git_installed;
use easycommit::{
    AppError, ConfigStore, Connector, GitCli, Outcome, Pipeline, Session, TerminalPrompter,
};

/// Suggest commit messages for staged changes with OpenAI or DeepSeek.
#[derive(Parser, Debug)]
#[command(name = "easycommit")]
#[command(about = "Suggest commit messages for staged changes with OpenAI or DeepSeek")]
#[command(version)]
struct Cli {
    /// Forget the stored API key and ask for a new one
    #[arg(long)]
    reset_key: bool,

    /// Extra context for the model (all words are joined with spaces)
    #[arg(value_name = "CONTEXT")]
    context: Vec<String>,
}

// One run is strictly sequential, so prompts and git calls block the only thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => {
            debug!("Outcome: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    check_git_installed()?;

    let session = Session::new(cli.reset_key, &cli.context);
    let store = ConfigStore::from_env();
    debug!("Config path: {}", store.path().display());

    let prompter = TerminalPrompter;
    let vcs = GitCli::new();
    let connector = Connector::default();
    let pipeline = Pipeline {
        store: &store,
        prompter: &prompter,
        vcs: &vcs,
        connector: &connector,
    };

    Ok(pipeline.run(&session).await?)
}

/// Print a fatal error and its hints, without a backtrace.
fn report_error(err: &anyhow::Error) {
    eprintln!("{}", render_error(err));
}

/// The fatal message followed by any hints.
///
/// Only the top error is printed: every wrapping variant already carries its
/// cause in its own message.
fn render_error(err: &anyhow::Error) -> String {
    let mut rendered = format!("❌ {}", err);

    let hints = err
        .downcast_ref::<AppError>()
        .map(AppError::hints)
        .unwrap_or_default();
    if !hints.is_empty() {
        rendered.push('\n');
    }
    for hint in hints {
        rendered.push('\n');
        rendered.push_str(&hint);
    }
    rendered
}

/// Log to stderr at `warn` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
