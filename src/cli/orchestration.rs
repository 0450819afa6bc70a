//! Top-level workflow
//!
//! Glues configuration loading and the conversion procedure together,
//! keeping `main.rs` down to argument parsing and exit handling.

use tracing::info;

use crate::config::{load_config, Config, ConversionOptions};
use crate::convert::{run_conversion, ConversionSummary};
use crate::error::Result;
use crate::runner::Runner;

/// Resolve the final configuration for `options`.
pub fn resolve_config(options: &ConversionOptions) -> Result<Config> {
    let file = load_config(options.config_path.as_deref())?;
    Config::resolve(options, file)
}

/// Run a conversion with `runner`.
///
/// # Returns
/// * `Ok(ConversionSummary)` - Everything was converted
/// * `Err` - The first fatal error; its `exit_code()` is the process status
pub fn run<R: Runner>(
    runner: &R,
    options: &ConversionOptions,
    config: &Config,
) -> Result<ConversionSummary> {
    info!(
        clone = config.clone,
        layout = ?config.layout_flags(),
        dry_run = config.dry_run,
        "starting conversion"
    );
    run_conversion(runner, options.url.as_deref(), config)
}
