use crate::error::{Result, Svn2GitError};
use crate::runner::{command_line, Runner};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Exit code `git` uses for fatal errors such as "tag already exists"
const GIT_FATAL: i32 = 128;

#[derive(Debug)]
struct MockState {
    git_version: String,
    svn_available: bool,
    in_repository: bool,
    listing: Vec<String>,
    remote_branches: Vec<String>,
    invalid_refs: HashSet<String>,
    local_branches: BTreeMap<String, String>,
    tags: BTreeMap<String, String>,
    head: Option<String>,
    git_config: BTreeMap<String, Vec<String>>,
    failures: HashMap<String, i32>,
    history: Vec<String>,
}

/// Mock runner simulating a git-svn mirror without spawning processes
///
/// Understands the subset of `git` the conversion issues: version probes,
/// `svn init`/`fetch`, `config`, `branch -r`, `rev-parse --verify`,
/// `checkout`, `tag` and `branch`. `svn init` writes the same
/// `svn-remote.svn.*` refspecs git-svn does. Every command is recorded in [MockRunner::history].
/// Unrecognized commands succeed silently.
pub struct MockRunner {
    state: Mutex<MockState>,
}

impl MockRunner {
    /// Create a mock mirror that already exists locally, with a `master`
    /// branch and nothing else
    pub fn new() -> Self {
        let mut local_branches = BTreeMap::new();
        local_branches.insert("master".to_string(), "git-svn".to_string());

        MockRunner {
            state: Mutex::new(MockState {
                git_version: "2.43.0".to_string(),
                svn_available: true,
                in_repository: true,
                listing: Vec::new(),
                remote_branches: Vec::new(),
                invalid_refs: HashSet::new(),
                local_branches,
                tags: BTreeMap::new(),
                head: Some("master".to_string()),
                git_config: BTreeMap::new(),
                failures: HashMap::new(),
                history: Vec::new(),
            }),
        }
    }

    /// Create a mock with no repository in the working directory
    pub fn empty() -> Self {
        let runner = Self::new();
        {
            let mut state = runner.lock();
            state.in_repository = false;
            state.local_branches.clear();
            state.head = None;
        }
        runner
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a remote branch; it is listed by `git branch -r` in insertion order
    pub fn add_remote_branch(&mut self, name: impl Into<String>) {
        let name = name.into();
        let state = self.state_mut();
        state.listing.push(format!("  {}", name));
        state.remote_branches.push(name);
    }

    /// Add a raw line to the `git branch -r` output without creating a ref
    pub fn add_listing_line(&mut self, line: impl Into<String>) {
        self.state_mut().listing.push(line.into());
    }

    /// Make an already listed remote branch fail `rev-parse --verify`
    pub fn mark_invalid(&mut self, name: impl Into<String>) {
        self.state_mut().invalid_refs.insert(name.into());
    }

    /// Add a local branch pointing at `start`
    pub fn add_local_branch(&mut self, name: impl Into<String>, start: impl Into<String>) {
        self.state_mut()
            .local_branches
            .insert(name.into(), start.into());
    }

    /// Remove a local branch
    pub fn remove_local_branch(&mut self, name: &str) {
        self.state_mut().local_branches.remove(name);
    }

    /// Add a tag pointing at `target`
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.state_mut().tags.insert(name.into(), target.into());
    }

    /// Append a value to a git config key, as `git config --add` would
    pub fn add_git_config(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state_mut()
            .git_config
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// All values of a git config key
    pub fn git_config(&self, key: &str) -> Vec<String> {
        self.lock().git_config.get(key).cloned().unwrap_or_default()
    }

    /// Set the version reported by `git --version`
    pub fn set_git_version(&mut self, version: impl Into<String>) {
        self.state_mut().git_version = version.into();
    }

    /// Control whether `git svn --version` succeeds
    pub fn set_svn_available(&mut self, available: bool) {
        self.state_mut().svn_available = available;
    }

    /// Force the exact command line `command` to exit with `code`
    pub fn fail_on(&mut self, command: impl Into<String>, code: i32) {
        self.state_mut().failures.insert(command.into(), code);
    }

    /// Every command line issued so far, in order
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Forget recorded commands
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Tags and the ref each one was created from
    pub fn tags(&self) -> BTreeMap<String, String> {
        self.lock().tags.clone()
    }

    /// Local branches and the ref each one was created from
    pub fn local_branches(&self) -> BTreeMap<String, String> {
        self.lock().local_branches.clone()
    }

    /// The currently checked out ref
    pub fn head(&self) -> Option<String> {
        self.lock().head.clone()
    }

    fn execute(&self, argv: &[&str]) -> Result<String> {
        let line = command_line(argv);
        let mut state = self.lock();
        state.history.push(line.clone());

        if let Some(&code) = state.failures.get(&line) {
            return Err(Svn2GitError::command_failed(line, code));
        }

        let fail = |code: i32| Err(Svn2GitError::command_failed(line.clone(), code));

        match argv {
            ["git", "--version"] => Ok(format!("git version {}\n", state.git_version)),
            ["git", "svn", "--version"] => {
                if state.svn_available {
                    Ok("git-svn version 2.43.0 (svn 1.14.2)\n".to_string())
                } else {
                    fail(1)
                }
            }
            ["git", "svn", "init", options @ ..] => {
                state.in_repository = true;
                state.record_svn_layout(options);
                Ok(String::new())
            }
            ["git", "config", "--get-all", key] => match state.git_config.get(*key) {
                Some(values) => Ok(values.iter().map(|v| format!("{}\n", v)).collect()),
                None => fail(1),
            },
            ["git", "config", key, value] => {
                state
                    .git_config
                    .insert(key.to_string(), vec![value.to_string()]);
                Ok(String::new())
            }
            ["git", "rev-parse", "--git-dir"] => {
                if state.in_repository {
                    Ok(".git\n".to_string())
                } else {
                    fail(GIT_FATAL)
                }
            }
            ["git", "branch", "-r"] => Ok(state
                .listing
                .iter()
                .map(|l| format!("{}\n", l))
                .collect()),
            ["git", "rev-parse", "--verify", "--quiet", name] => {
                if state.resolves(name) {
                    Ok(format!("{}\n", name))
                } else {
                    fail(1)
                }
            }
            ["git", "checkout", "-f", "-B", name] => {
                let start = state.head.clone().unwrap_or_default();
                state.local_branches.insert(name.to_string(), start);
                state.head = Some(name.to_string());
                Ok(String::new())
            }
            ["git", "checkout", name] => {
                if state.resolves(name) {
                    state.head = Some(name.to_string());
                    Ok(String::new())
                } else {
                    fail(1)
                }
            }
            ["git", "tag", "-f", name] => {
                let target = state.head.clone().unwrap_or_default();
                state.tags.insert(name.to_string(), target);
                Ok(String::new())
            }
            ["git", "tag", name] => {
                if state.tags.contains_key(*name) {
                    return fail(GIT_FATAL);
                }
                let target = state.head.clone().unwrap_or_default();
                state.tags.insert(name.to_string(), target);
                Ok(String::new())
            }
            ["git", "branch", "--track", name, start] => {
                if state.local_branches.contains_key(*name) {
                    return fail(GIT_FATAL);
                }
                state
                    .local_branches
                    .insert(name.to_string(), start.to_string());
                Ok(String::new())
            }
            ["git", "branch", "-D", name] => {
                if state.local_branches.remove(*name).is_some() {
                    Ok(String::new())
                } else {
                    fail(1)
                }
            }
            _ => Ok(String::new()),
        }
    }
}

impl MockState {
    /// Mirror git-svn's refspec bookkeeping for `git svn init` options.
    fn record_svn_layout(&mut self, options: &[&str]) {
        let mut prefix = "";
        let mut trunk = None;
        let mut branches = None;
        let mut tags = None;

        for option in options {
            if *option == "--stdlayout" {
                trunk = Some("trunk");
                branches = Some("branches");
                tags = Some("tags");
            } else if let Some(p) = option.strip_prefix("--prefix=") {
                prefix = p;
            } else if let Some(t) = option.strip_prefix("--trunk=") {
                trunk = Some(t);
            } else if let Some(b) = option.strip_prefix("--branches=") {
                branches = Some(b);
            } else if let Some(t) = option.strip_prefix("--tags=") {
                tags = Some(t);
            }
        }

        let mut set = |key: &str, value: String| {
            self.git_config.insert(key.to_string(), vec![value]);
        };
        if let Some(trunk) = trunk {
            set(
                "svn-remote.svn.fetch",
                format!("{}:refs/remotes/{}trunk", trunk, prefix),
            );
        }
        if let Some(branches) = branches {
            set(
                "svn-remote.svn.branches",
                format!("{}/*:refs/remotes/{}*", branches, prefix),
            );
        }
        if let Some(tags) = tags {
            set(
                "svn-remote.svn.tags",
                format!("{}/*:refs/remotes/{}tags/*", tags, prefix),
            );
        }
    }

    fn resolves(&self, name: &str) -> bool {
        if self.invalid_refs.contains(name) {
            return false;
        }
        if let Some(local) = name.strip_prefix("refs/heads/") {
            return self.local_branches.contains_key(local);
        }
        if let Some(remote) = name.strip_prefix("remotes/") {
            return self.remote_branches.iter().any(|b| b == remote);
        }
        self.remote_branches.iter().any(|b| b == name)
            || self.local_branches.contains_key(name)
            || self.tags.contains_key(name)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for MockRunner {
    fn run(&self, argv: &[&str]) -> Result<()> {
        self.execute(argv).map(|_| ())
    }

    fn output(&self, argv: &[&str]) -> Result<String> {
        self.execute(argv)
    }

    fn succeeds(&self, argv: &[&str]) -> bool {
        self.execute(argv).is_ok()
    }
}
