use std::io::IsTerminal;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Only log warnings and errors unless RUST_LOG says otherwise
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: gcwii::commands::Commands,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::WARN
        } else {
            LevelFilter::INFO
        }
    }
}

/// Logs go to stderr, stdout carries the command output
fn init_logging(level: LevelFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .try_init()
        .into_diagnostic()
}

fn main() -> Result<()> {
    better_panic::install();

    let cli = Cli::parse();
    init_logging(cli.log_level())?;

    cli.command.handle()
}
