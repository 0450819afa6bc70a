use crate::error::{Result, Svn2GitError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory and
/// the user config directory
pub const CONFIG_FILE_NAME: &str = "svn2git.toml";

/// Branch recreated from trunk at the end of a conversion
pub const DEFAULT_BRANCH: &str = "master";

fn default_true() -> bool {
    true
}

fn default_branch_name() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Settings read from `svn2git.toml`.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub authors: Option<PathBuf>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub exclude: Option<String>,

    #[serde(default = "default_true")]
    pub metadata: bool,

    #[serde(default = "default_branch_name")]
    pub default_branch: String,
}

/// Subversion directory layout
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LayoutConfig {
    #[serde(default)]
    pub trunk: Option<String>,

    #[serde(default)]
    pub branches: Option<String>,

    #[serde(default)]
    pub tags: Option<String>,
}

/// Tag materialization behavior
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TagsConfig {
    #[serde(default)]
    pub strip_prefix: Option<String>,

    #[serde(default)]
    pub force: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            layout: LayoutConfig::default(),
            tags: TagsConfig::default(),
            authors: None,
            username: None,
            exclude: None,
            metadata: true,
            default_branch: default_branch_name(),
        }
    }
}

/// Loads the configuration file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `svn2git.toml` in current directory
/// 3. `svn2git.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            path
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        Svn2GitError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Svn2GitError::config(format!("invalid '{}': {}", path.display(), e)))
}

/// Authors file used when none is configured: `~/.svn2git/authors`, if present
pub fn default_authors_file() -> Option<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".svn2git").join("authors"))
        .filter(|path| path.is_file())
}

/// Conversion settings as given on the command line.
///
/// Decoupled from clap so a conversion can be driven programmatically.
/// `None` in a tri-state flag means "not given", leaving the file value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionOptions {
    pub url: Option<String>,
    pub trunk: Option<String>,
    pub branches: Option<String>,
    pub tags: Option<String>,
    pub authors: Option<PathBuf>,
    pub clone: bool,
    pub strip_tag_prefix: Option<String>,
    pub force_tag: Option<bool>,
    pub verbose: bool,
    pub username: Option<String>,
    pub exclude: Option<String>,
    pub metadata: Option<bool>,
    pub default_branch: Option<String>,
    pub dry_run: bool,
    pub config_path: Option<String>,
}

/// Immutable settings for one conversion run
///
/// The layout paths only shape `git svn init`; the ref names they produce
/// are read back from the mirror (see [crate::domain::RemoteRefs]).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub trunk: Option<String>,
    pub branches: Option<String>,
    pub tags: Option<String>,
    pub authors: Option<PathBuf>,
    pub strip_tag_prefix: Option<String>,
    pub force_tag: bool,
    pub verbose: bool,
    pub clone: bool,
    pub username: Option<String>,
    pub exclude: Option<String>,
    pub metadata: bool,
    pub default_branch: String,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trunk: None,
            branches: None,
            tags: None,
            authors: None,
            strip_tag_prefix: None,
            force_tag: false,
            verbose: false,
            clone: true,
            username: None,
            exclude: None,
            metadata: true,
            default_branch: default_branch_name(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Merge command-line options over file settings.
    ///
    /// Fails with a configuration error if the exclude pattern is not a valid
    /// regex or the authors file does not exist, and with a usage error when
    /// a dry run is requested together with cloning.
    pub fn resolve(options: &ConversionOptions, file: FileConfig) -> Result<Config> {
        if options.dry_run && options.clone {
            return Err(Svn2GitError::usage(
                "--dry-run needs an existing mirror; combine it with --noclone",
            ));
        }

        let exclude = options.exclude.clone().or(file.exclude);
        if let Some(pattern) = &exclude {
            Regex::new(pattern).map_err(|e| {
                Svn2GitError::config(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        let authors = match options.authors.clone().or(file.authors) {
            Some(path) if !path.is_file() => {
                return Err(Svn2GitError::config(format!(
                    "authors file '{}' does not exist",
                    path.display()
                )));
            }
            Some(path) => Some(path),
            None => default_authors_file(),
        };

        let default_branch = options
            .default_branch
            .clone()
            .unwrap_or(file.default_branch);
        if default_branch.trim().is_empty() {
            return Err(Svn2GitError::config("default branch name cannot be empty"));
        }

        Ok(Config {
            trunk: options.trunk.clone().or(file.layout.trunk),
            branches: options.branches.clone().or(file.layout.branches),
            tags: options.tags.clone().or(file.layout.tags),
            authors,
            strip_tag_prefix: options.strip_tag_prefix.clone().or(file.tags.strip_prefix),
            force_tag: options.force_tag.unwrap_or(file.tags.force),
            verbose: options.verbose,
            clone: options.clone,
            username: options.username.clone().or(file.username),
            exclude,
            metadata: options.metadata.unwrap_or(file.metadata),
            default_branch,
            dry_run: options.dry_run,
        })
    }

    /// Layout flags for `git svn init`.
    ///
    /// One flag per configured path, or `--stdlayout` when none is set.
    pub fn layout_flags(&self) -> Vec<String> {
        let flags: Vec<String> = [
            ("--trunk", &self.trunk),
            ("--branches", &self.branches),
            ("--tags", &self.tags),
        ]
        .iter()
        .filter_map(|(flag, path)| path.as_ref().map(|p| format!("{}={}", flag, p)))
        .collect();

        if flags.is_empty() {
            vec!["--stdlayout".to_string()]
        } else {
            flags
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloning() -> ConversionOptions {
        ConversionOptions {
            url: Some("svn://example.org/repo".to_string()),
            clone: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_layout_flags_default_to_stdlayout() {
        let config = Config::default();
        assert_eq!(config.layout_flags(), vec!["--stdlayout"]);
    }

    #[test]
    fn test_layout_flags_only_given_paths() {
        let config = Config {
            trunk: Some("main".to_string()),
            tags: Some("releases".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.layout_flags(),
            vec!["--trunk=main", "--tags=releases"]
        );
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut options = cloning();
        options.trunk = Some("cli-trunk".to_string());
        options.default_branch = Some("main".to_string());

        let mut file = FileConfig::default();
        file.layout.trunk = Some("file-trunk".to_string());
        file.layout.tags = Some("file-tags".to_string());
        file.default_branch = "develop".to_string();

        let config = Config::resolve(&options, file).unwrap();
        assert_eq!(config.trunk.as_deref(), Some("cli-trunk"));
        assert_eq!(config.tags.as_deref(), Some("file-tags"));
        assert_eq!(config.default_branch, "main");
    }

    #[test]
    fn test_force_and_metadata_follow_file_when_not_given() {
        let mut file = FileConfig::default();
        file.tags.force = true;
        file.metadata = false;

        let config = Config::resolve(&cloning(), file).unwrap();
        assert!(config.force_tag);
        assert!(!config.metadata);
    }

    #[test]
    fn test_cli_can_turn_off_file_force_and_restore_metadata() {
        let mut options = cloning();
        options.force_tag = Some(false);
        options.metadata = Some(true);

        let mut file = FileConfig::default();
        file.tags.force = true;
        file.metadata = false;

        let config = Config::resolve(&options, file).unwrap();
        assert!(!config.force_tag);
        assert!(config.metadata);
    }

    #[test]
    fn test_cli_can_disable_metadata() {
        let mut options = cloning();
        options.metadata = Some(false);

        let config = Config::resolve(&options, FileConfig::default()).unwrap();
        assert!(!config.metadata);
    }

    #[test]
    fn test_invalid_exclude_is_config_error() {
        let mut options = cloning();
        options.exclude = Some("docs/(".to_string());

        let err = Config::resolve(&options, FileConfig::default()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Config(_)));
    }

    #[test]
    fn test_missing_authors_file_is_config_error() {
        let mut options = cloning();
        options.authors = Some(PathBuf::from("/nonexistent/svn2git/authors"));

        let err = Config::resolve(&options, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/svn2git/authors"));
    }

    #[test]
    fn test_dry_run_requires_noclone() {
        let mut options = cloning();
        options.dry_run = true;

        let err = Config::resolve(&options, FileConfig::default()).unwrap_err();
        assert!(matches!(err, Svn2GitError::Usage(_)));

        options.clone = false;
        assert!(Config::resolve(&options, FileConfig::default()).unwrap().dry_run);
    }

    #[test]
    fn test_empty_default_branch_rejected() {
        let mut options = cloning();
        options.default_branch = Some("  ".to_string());

        assert!(Config::resolve(&options, FileConfig::default()).is_err());
    }
}
