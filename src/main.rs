//! Pomodoro Timer CLI - a terminal countdown timer
//!
//! Three fixed modes:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::info;

use pomotimer::cli::{spawn_stdin_reader, Cli, Commands, Display, RunArgs};
use pomotimer::engine::{Session, TimerEvent};
use pomotimer::notify::{try_create_chime, Notifier, TerminalNotifier};
use pomotimer::types::{OutputFormat, SessionConfig};

/// Capacity of the control command channel
const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => {
            run_session(&args).await?;
        }
        Some(Commands::Durations) => {
            Display::show_durations();
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive timer session until quit, Ctrl-C, or (with `--once`)
/// the first completion.
async fn run_session(args: &RunArgs) -> Result<()> {
    let config = args.to_config();
    config
        .validate()
        .context("invalid session configuration")?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

    let presenter = tokio::spawn(present(event_rx, config.output));
    let session = Session::new(config.clone(), event_tx, build_notifiers(&config));

    Display::show_welcome(config.initial_mode, config.auto_start);

    // The reader gets a clone: end of input must not end a running countdown.
    spawn_stdin_reader(command_tx.clone()).context("failed to start input reader")?;

    tokio::select! {
        result = session.run(command_rx) => {
            let state = result.context("timer session failed")?;
            info!(?state, "session finished");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
        }
    }
    drop(command_tx);

    presenter.await.context("presenter task failed")?;
    Ok(())
}

/// Prints every event until the session drops its sender.
async fn present(mut events: mpsc::UnboundedReceiver<TimerEvent>, format: OutputFormat) {
    while let Some(event) = events.recv().await {
        Display::show_event(&event, format);
    }
}

/// Builds the completion notifiers for the configuration.
fn build_notifiers(config: &SessionConfig) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(TerminalNotifier::new(config.bell))];

    if config.sound {
        if let Some(chime) = try_create_chime() {
            notifiers.push(Box::new(chime));
        }
    }

    notifiers
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
