use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mortgage_cli::cli::Cli;
use mortgage_cli::{app, presentation};

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`, or `debug` with `--verbose`.
/// * Strips timestamps and target names to keep CLI output clean.
/// * Logs go to stderr so the report on stdout can be redirected.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!(?cli, "parsed arguments");
    let result = app::run(&cli)?;
    print!("{}", presentation::render(&result, cli.yearly));

    Ok(())
}
