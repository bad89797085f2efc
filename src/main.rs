use std::process;

use clap::Parser;
use git_epoch::cli::Cli;
use git_epoch::ui;
use git_epoch::GitEpochError;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warn, or debug with --verbose.
    // Logs go to stderr so they never mix with command output.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        ui::display_error(&e.to_string());

        let code = e
            .downcast_ref::<GitEpochError>()
            .map_or(1, GitEpochError::exit_code);
        process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    cli.execute()?;
    Ok(())
}
