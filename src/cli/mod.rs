//! Command-line surface

pub mod orchestration;

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConversionOptions;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "svn2git",
    version,
    about = "Convert a git-svn mirror of a Subversion repository into idiomatic git branches and tags"
)]
pub struct Args {
    #[arg(long, value_name = "PATH", help = "Subversion path of the trunk")]
    pub trunk: Option<String>,

    #[arg(long, value_name = "PATH", help = "Subversion path of the branches")]
    pub branches: Option<String>,

    #[arg(long, value_name = "PATH", help = "Subversion path of the tags")]
    pub tags: Option<String>,

    #[arg(long, value_name = "FILE", help = "Authors file mapping svn users to git identities")]
    pub authors: Option<PathBuf>,

    #[arg(
        long,
        overrides_with = "noclone",
        help = "Create the mirror from SVN_URL first (default)"
    )]
    pub clone: bool,

    #[arg(
        long,
        overrides_with = "clone",
        help = "Convert the mirror in the current directory without cloning"
    )]
    pub noclone: bool,

    #[arg(long, value_name = "PREFIX", help = "Prefix to remove from tag names")]
    pub strip_tag_prefix: Option<String>,

    #[arg(long, overrides_with = "no_force_tag", help = "Overwrite existing tags")]
    pub force_tag: bool,

    #[arg(
        long,
        overrides_with = "force_tag",
        help = "Fail on existing tags, even if the config file enables forcing"
    )]
    pub no_force_tag: bool,

    #[arg(short, long, help = "Echo every command before it runs")]
    pub verbose: bool,

    #[arg(long, value_name = "NAME", help = "Subversion username")]
    pub username: Option<String>,

    #[arg(long, value_name = "REGEX", help = "Ignore repository paths matching REGEX")]
    pub exclude: Option<String>,

    #[arg(
        long,
        overrides_with = "no_metadata",
        help = "Record git-svn-id metadata in commit messages (default)"
    )]
    pub metadata: bool,

    #[arg(
        long,
        overrides_with = "metadata",
        help = "Do not record git-svn-id metadata in commit messages"
    )]
    pub no_metadata: bool,

    #[arg(long, value_name = "NAME", help = "Branch recreated from trunk [default: master]")]
    pub default_branch: Option<String>,

    #[arg(long, help = "Print the commands that would change the mirror without running them")]
    pub dry_run: bool,

    #[arg(short, long, value_name = "FILE", help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(value_name = "SVN_URL", help = "URL of the Subversion repository")]
    pub url: Option<String>,
}

impl Args {
    /// Whether the mirror should be created first
    pub fn clone_enabled(&self) -> bool {
        !self.noclone
    }

    pub fn into_options(self) -> ConversionOptions {
        let clone = self.clone_enabled();
        let force_tag = flag_pair(self.force_tag, self.no_force_tag);
        let metadata = flag_pair(self.metadata, self.no_metadata);

        ConversionOptions {
            url: self.url,
            trunk: self.trunk,
            branches: self.branches,
            tags: self.tags,
            authors: self.authors,
            clone,
            strip_tag_prefix: self.strip_tag_prefix,
            force_tag,
            verbose: self.verbose,
            username: self.username,
            exclude: self.exclude,
            metadata,
            default_branch: self.default_branch,
            dry_run: self.dry_run,
            config_path: self.config,
        }
    }
}

/// Collapse an `--x` / `--no-x` pair into "on", "off" or "not given".
///
/// The two flags override each other, so at most one is set.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["svn2git", "svn://example.org/repo"]).unwrap();
        assert!(args.clone_enabled());
        assert!(!args.verbose);
        assert_eq!(args.url.as_deref(), Some("svn://example.org/repo"));
    }

    #[test]
    fn test_layout_flags_with_equals() {
        let args = Args::try_parse_from([
            "svn2git",
            "--trunk=main",
            "--branches=dev",
            "--tags=releases",
            "--strip-tag-prefix=release-",
            "--force-tag",
            "svn://x",
        ])
        .unwrap();

        let options = args.into_options();
        assert_eq!(options.trunk.as_deref(), Some("main"));
        assert_eq!(options.branches.as_deref(), Some("dev"));
        assert_eq!(options.tags.as_deref(), Some("releases"));
        assert_eq!(options.strip_tag_prefix.as_deref(), Some("release-"));
        assert_eq!(options.force_tag, Some(true));
        assert_eq!(options.metadata, None);
    }

    #[test]
    fn test_noclone_without_url() {
        let args = Args::try_parse_from(["svn2git", "--noclone", "-v"]).unwrap();
        assert!(!args.clone_enabled());
        assert!(args.verbose);
        assert_eq!(args.url, None);
    }

    #[test]
    fn test_last_clone_flag_wins() {
        let args = Args::try_parse_from(["svn2git", "--noclone", "--clone", "svn://x"]).unwrap();
        assert!(args.clone_enabled());

        let args = Args::try_parse_from(["svn2git", "--clone", "--noclone"]).unwrap();
        assert!(!args.clone_enabled());
    }

    #[test]
    fn test_no_force_tag_and_metadata_pairs() {
        let options = Args::try_parse_from(["svn2git", "--no-force-tag", "--no-metadata", "svn://x"])
            .unwrap()
            .into_options();
        assert_eq!(options.force_tag, Some(false));
        assert_eq!(options.metadata, Some(false));

        let options = Args::try_parse_from([
            "svn2git",
            "--no-force-tag",
            "--force-tag",
            "--no-metadata",
            "--metadata",
            "svn://x",
        ])
        .unwrap()
        .into_options();
        assert_eq!(options.force_tag, Some(true));
        assert_eq!(options.metadata, Some(true));
    }

    #[test]
    fn test_tri_state_flags_default_to_not_given() {
        let options = Args::try_parse_from(["svn2git", "svn://x"])
            .unwrap()
            .into_options();
        assert_eq!(options.force_tag, None);
        assert_eq!(options.metadata, None);
    }
}
