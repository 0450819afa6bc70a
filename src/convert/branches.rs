use tracing::debug;

use crate::convert::ConversionSummary;
use crate::error::Result;
use crate::runner::Runner;

/// Create a local tracking branch for every remote branch except trunk.
///
/// Trunk is left to [crate::convert::promote_trunk].
pub fn materialize_branches<R: Runner>(
    runner: &R,
    branches: &[String],
    trunk_name: &str,
    summary: &mut ConversionSummary,
) -> Result<()> {
    for branch in branches {
        if branch == trunk_name {
            debug!(%branch, "skipping trunk");
            continue;
        }

        let remote = format!("remotes/{}", branch);
        runner.run(&["git", "checkout", branch.as_str()])?;
        runner.run(&["git", "branch", "--track", branch.as_str(), remote.as_str()])?;

        summary.branches.push(branch.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::MockRunner;

    #[test]
    fn test_trunk_is_skipped() {
        let mut runner = MockRunner::new();
        runner.add_remote_branch("trunk");
        runner.add_remote_branch("feature");
        let mut summary = ConversionSummary::default();

        materialize_branches(
            &runner,
            &["trunk".to_string(), "feature".to_string()],
            "trunk",
            &mut summary,
        )
        .unwrap();

        assert_eq!(summary.branches, vec!["feature"]);
        assert_eq!(
            runner.history(),
            vec![
                "git checkout feature",
                "git branch --track feature remotes/feature"
            ]
        );
        assert_eq!(
            runner.local_branches().get("feature").unwrap(),
            "remotes/feature"
        );
    }

    #[test]
    fn test_no_branches_issues_no_commands() {
        let runner = MockRunner::new();
        let mut summary = ConversionSummary::default();

        materialize_branches(&runner, &[], "trunk", &mut summary).unwrap();

        assert!(runner.history().is_empty());
        assert!(summary.branches.is_empty());
    }

    #[test]
    fn test_existing_local_branch_aborts() {
        let mut runner = MockRunner::new();
        runner.add_remote_branch("feature");
        runner.add_local_branch("feature", "somewhere");
        let mut summary = ConversionSummary::default();

        let result =
            materialize_branches(&runner, &["feature".to_string()], "trunk", &mut summary);

        assert!(result.is_err());
        assert!(summary.branches.is_empty());
    }
}
