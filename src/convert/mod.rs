//! The conversion procedure
//!
//! Steps run strictly in order, each one blocking on the commands it issues:
//!
//! 1. [bootstrap::bootstrap] - create and fetch the mirror (clone mode only)
//! 2. [bootstrap::sanity_check] - make sure we are inside a repository,
//!    then [detect_remote_refs] finds git-svn's trunk and tags ref names
//! 3. [tags::materialize_tags] - tag-candidate branches become tags
//! 4. [branches::materialize_branches] - remaining branches become local
//! 5. [trunk::promote_trunk] - the default branch is recreated from trunk
//!
//! The first fatal error ends the run. Nothing already created is rolled back.

pub mod bootstrap;
pub mod branches;
pub mod tags;
pub mod trunk;

pub use bootstrap::{bootstrap, check_environment, parse_git_version, sanity_check};
pub use branches::materialize_branches;
pub use tags::materialize_tags;
pub use trunk::promote_trunk;

use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{classify, parse_listing, BranchListing, RemoteRefs};
use crate::error::Result;
use crate::runner::Runner;
use crate::ui;
use crate::warning::ConversionWarning;

/// What a finished conversion produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Tags created, in creation order
    pub tags: Vec<String>,
    /// Local branches created, in creation order
    pub branches: Vec<String>,
    /// Default branch recreated from trunk, if a trunk was found
    pub promoted: Option<String>,
    /// Soft problems reported along the way
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionSummary {
    /// Report a warning to the user and remember it
    pub fn warn(&mut self, warning: ConversionWarning) {
        debug!(%warning, "soft failure");
        ui::display_warning(&warning);
        self.warnings.push(warning);
    }
}

/// Read the trunk and tags ref names from the mirror's git-svn config.
///
/// Layout paths given to `git svn init` never change these names, but a
/// mirror created with a non-empty `--prefix` does. Missing keys fall back
/// to git-svn's defaults.
pub fn detect_remote_refs<R: Runner>(runner: &R) -> RemoteRefs {
    let fetch = runner
        .output(&["git", "config", "--get-all", "svn-remote.svn.fetch"])
        .ok();
    let tags = runner
        .output(&["git", "config", "--get-all", "svn-remote.svn.tags"])
        .ok();

    let refs = RemoteRefs::from_refspecs(fetch.as_deref(), tags.as_deref());
    debug!(trunk = %refs.trunk, tags_prefix = %refs.tags_prefix, "remote ref names");
    refs
}

/// Query `git branch -r` and classify the result.
///
/// Unparseable listing lines are reported and left out.
pub fn list_remote_branches<R: Runner>(
    runner: &R,
    tags_prefix: &str,
    summary: &mut ConversionSummary,
) -> Result<BranchListing> {
    let output = runner.output(&["git", "branch", "-r"])?;
    let parsed = parse_listing(&output);

    for warning in parsed.warnings {
        summary.warn(warning);
    }

    let listing = classify(&parsed.names, tags_prefix);
    info!(
        tags = listing.tag_candidates.len(),
        branches = listing.other_branches.len(),
        "classified remote branches"
    );
    Ok(listing)
}

/// Run the whole conversion against `runner`.
///
/// `url` is only used, and required, when `config.clone` is set.
pub fn run_conversion<R: Runner>(
    runner: &R,
    url: Option<&str>,
    config: &Config,
) -> Result<ConversionSummary> {
    let mut summary = ConversionSummary::default();

    if config.clone {
        bootstrap(runner, url, config)?;
    }
    sanity_check(runner)?;

    let refs = detect_remote_refs(runner);
    let listing = list_remote_branches(runner, &refs.tags_prefix, &mut summary)?;

    ui::display_status(&format!(
        "Converting {} tag branch(es)",
        listing.tag_candidates.len()
    ));
    materialize_tags(
        runner,
        &listing.tag_candidates,
        &refs.tags_prefix,
        config.strip_tag_prefix.as_deref(),
        config.force_tag,
        &mut summary,
    )?;

    ui::display_status("Creating local branches");
    materialize_branches(
        runner,
        &listing.other_branches,
        &refs.trunk,
        &mut summary,
    )?;

    promote_trunk(
        runner,
        &listing.other_branches,
        &refs.trunk,
        &config.default_branch,
        &mut summary,
    )?;

    Ok(summary)
}
