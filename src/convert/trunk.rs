use tracing::debug;

use crate::convert::ConversionSummary;
use crate::error::Result;
use crate::runner::Runner;
use crate::ui;

/// Recreate the default branch from trunk.
///
/// Issues no commands at all when no remote branch is named `trunk_name`.
/// Otherwise checks out trunk, deletes the local default branch if there is
/// one, and force-creates it at trunk.
pub fn promote_trunk<R: Runner>(
    runner: &R,
    remote_branches: &[String],
    trunk_name: &str,
    default_branch: &str,
    summary: &mut ConversionSummary,
) -> Result<()> {
    if !remote_branches.iter().any(|b| b.trim() == trunk_name) {
        debug!(%trunk_name, "no trunk branch, leaving default branch alone");
        return Ok(());
    }

    runner.run(&["git", "checkout", trunk_name])?;

    let local_ref = format!("refs/heads/{}", default_branch);
    if runner.succeeds(&["git", "rev-parse", "--verify", "--quiet", local_ref.as_str()]) {
        runner.run(&["git", "branch", "-D", default_branch])?;
    }

    runner.run(&["git", "checkout", "-f", "-B", default_branch])?;

    ui::display_success(&format!("'{}' now points at {}", default_branch, trunk_name));
    summary.promoted = Some(default_branch.to_string());
    Ok(())
}
