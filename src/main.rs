use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use svn2git::cli::{orchestration, Args};
use svn2git::runner::SystemRunner;
use svn2git::ui;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "svn2git=debug" } else { "svn2git=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = args.into_options();
    let config =
        orchestration::resolve_config(&options).context("Cannot set up the conversion")?;
    let runner = SystemRunner::new(config.verbose, config.dry_run);

    // Conversion failures carry their own exit code, so they bypass anyhow.
    match orchestration::run(&runner, &options, &config) {
        Ok(summary) => {
            ui::display_summary(&summary);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
