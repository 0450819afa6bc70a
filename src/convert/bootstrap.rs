use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, Svn2GitError};
use crate::runner::Runner;
use crate::ui;

/// Oldest git release whose `git svn` understands every flag we pass
pub const MIN_GIT_VERSION: Version = Version::new(1, 7, 0);

static GIT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("git version pattern is valid")
});

/// Extract the version from `git --version` output.
///
/// Handles vendor suffixes such as "git version 2.39.3 (Apple Git-145)" and
/// two-component versions ("git version 2.40" -> 2.40.0).
pub fn parse_git_version(output: &str) -> Option<Version> {
    let caps = GIT_VERSION.captures(output)?;

    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    Some(Version::new(major, minor, patch))
}

/// Verify that `git` and its Subversion bridge are installed.
///
/// # Returns
/// * `Ok(Version)` - The detected git version
/// * `Err` - Environment error naming what is missing
pub fn check_environment<R: Runner>(runner: &R) -> Result<Version> {
    let output = runner.output(&["git", "--version"]).map_err(|e| {
        Svn2GitError::environment(format!("git is not available: {}", e))
    })?;

    let version = parse_git_version(&output).ok_or_else(|| {
        Svn2GitError::environment(format!(
            "cannot determine git version from '{}'",
            output.trim()
        ))
    })?;

    if version < MIN_GIT_VERSION {
        return Err(Svn2GitError::environment(format!(
            "git {} is too old; {} or newer is required",
            version, MIN_GIT_VERSION
        )));
    }

    if !runner.succeeds(&["git", "svn", "--version"]) {
        return Err(Svn2GitError::environment(
            "git svn is not available; install the git-svn package",
        ));
    }

    debug!(%version, "git and git-svn available");
    Ok(version)
}

/// Arguments for `git svn init`
pub fn init_args(url: &str, config: &Config) -> Vec<String> {
    let mut args = vec![
        "git".to_string(),
        "svn".to_string(),
        "init".to_string(),
        // Keep remote refs unprefixed so they list as "trunk", "tags/1.0".
        "--prefix=".to_string(),
    ];

    if let Some(username) = &config.username {
        args.push(format!("--username={}", username));
    }
    if !config.metadata {
        args.push("--no-metadata".to_string());
    }

    args.extend(config.layout_flags());
    args.push(url.to_string());
    args
}

/// Arguments for the initial `git svn fetch`
pub fn fetch_args(config: &Config) -> Vec<String> {
    let mut args = vec!["git".to_string(), "svn".to_string(), "fetch".to_string()];

    if let Some(exclude) = &config.exclude {
        args.push(format!("--ignore-paths={}", exclude));
    }

    args
}

fn run_owned<R: Runner>(runner: &R, args: &[String]) -> Result<()> {
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    runner.run(&argv)
}

/// Create the local mirror of `url` and fetch its history.
///
/// Requires cloning to be enabled and a non-empty URL; otherwise a usage
/// error is returned before any command is issued.
pub fn bootstrap<R: Runner>(runner: &R, url: Option<&str>, config: &Config) -> Result<()> {
    if !config.clone {
        return Err(Svn2GitError::usage("bootstrap requires cloning to be enabled"));
    }

    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| Svn2GitError::usage("SVN_URL is required unless --noclone is given"))?;

    check_environment(runner)?;

    ui::display_status(&format!("Initializing mirror of {}", url));
    run_owned(runner, &init_args(url, config))?;

    if let Some(authors) = &config.authors {
        let authors = authors.to_string_lossy().into_owned();
        info!(authors = %authors, "using authors file");
        runner.run(&["git", "config", "svn.authorsfile", authors.as_str()])?;
    }

    ui::display_status("Fetching Subversion history (this can take a while)");
    run_owned(runner, &fetch_args(config))?;

    ui::display_success("Mirror fetched");
    Ok(())
}

/// Make sure the working directory is a git repository.
pub fn sanity_check<R: Runner>(runner: &R) -> Result<()> {
    if runner.succeeds(&["git", "rev-parse", "--git-dir"]) {
        Ok(())
    } else {
        Err(Svn2GitError::environment(
            "not inside a git repository; run from the mirror or drop --noclone",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::MockRunner;
    use std::path::PathBuf;

    fn cloning() -> Config {
        Config::default()
    }

    #[test]
    fn test_parse_git_version_variants() {
        assert_eq!(
            parse_git_version("git version 2.43.0\n"),
            Some(Version::new(2, 43, 0))
        );
        assert_eq!(
            parse_git_version("git version 2.39.3 (Apple Git-145)"),
            Some(Version::new(2, 39, 3))
        );
        assert_eq!(
            parse_git_version("git version 2.40.windows.1"),
            Some(Version::new(2, 40, 0))
        );
        assert_eq!(parse_git_version("git version unknown"), None);
    }

    #[test]
    fn test_init_args_stdlayout() {
        let args = init_args("svn://example.org/repo", &cloning());
        assert_eq!(
            args,
            vec![
                "git",
                "svn",
                "init",
                "--prefix=",
                "--stdlayout",
                "svn://example.org/repo"
            ]
        );
    }

    #[test]
    fn test_init_args_custom_layout_and_options() {
        let config = Config {
            trunk: Some("main".to_string()),
            branches: Some("dev".to_string()),
            username: Some("jdoe".to_string()),
            metadata: false,
            ..Config::default()
        };
        let args = init_args("https://svn.example.org/p", &config);
        assert_eq!(
            args,
            vec![
                "git",
                "svn",
                "init",
                "--prefix=",
                "--username=jdoe",
                "--no-metadata",
                "--trunk=main",
                "--branches=dev",
                "https://svn.example.org/p"
            ]
        );
        assert!(!args.contains(&"--stdlayout".to_string()));
    }

    #[test]
    fn test_fetch_args_with_exclude() {
        let config = Config {
            exclude: Some("^docs/".to_string()),
            ..Config::default()
        };
        assert_eq!(
            fetch_args(&config),
            vec!["git", "svn", "fetch", "--ignore-paths=^docs/"]
        );
    }

    #[test]
    fn test_bootstrap_requires_url() {
        let runner = MockRunner::empty();
        let err = bootstrap(&runner, Some("  "), &cloning()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Usage(_)));

        let err = bootstrap(&runner, None, &cloning()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Usage(_)));
        assert!(runner.history().is_empty());
    }

    #[test]
    fn test_bootstrap_requires_clone() {
        let runner = MockRunner::empty();
        let config = Config {
            clone: false,
            ..Config::default()
        };
        let err = bootstrap(&runner, Some("svn://x"), &config).unwrap_err();
        assert!(matches!(err, Svn2GitError::Usage(_)));
        assert!(runner.history().is_empty());
    }

    #[test]
    fn test_bootstrap_command_sequence() {
        let runner = MockRunner::empty();
        let config = Config {
            authors: Some(PathBuf::from("/tmp/authors.txt")),
            ..Config::default()
        };

        bootstrap(&runner, Some("svn://example.org/repo"), &config).unwrap();

        assert_eq!(
            runner.history(),
            vec![
                "git --version",
                "git svn --version",
                "git svn init --prefix= --stdlayout svn://example.org/repo",
                "git config svn.authorsfile /tmp/authors.txt",
                "git svn fetch",
            ]
        );
    }

    #[test]
    fn test_missing_git_svn_is_environment_error() {
        let mut runner = MockRunner::empty();
        runner.set_svn_available(false);

        let err = bootstrap(&runner, Some("svn://x"), &cloning()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Environment(_)));
        assert!(err.to_string().contains("git svn"));
        assert!(!runner.history().iter().any(|c| c.contains("init")));
    }

    #[test]
    fn test_old_git_is_environment_error() {
        let mut runner = MockRunner::empty();
        runner.set_git_version("1.6.5");

        let err = check_environment(&runner).unwrap_err();
        assert!(err.to_string().contains("too old"));
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let mut runner = MockRunner::empty();
        runner.fail_on("git svn fetch", 1);

        let err = bootstrap(&runner, Some("svn://x"), &cloning()).unwrap_err();
        assert!(matches!(err, Svn2GitError::CommandFailed { .. }));
    }

    #[test]
    fn test_sanity_check() {
        assert!(sanity_check(&MockRunner::new()).is_ok());
        let err = sanity_check(&MockRunner::empty()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Environment(_)));
    }
}
