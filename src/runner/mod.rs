//! External command execution layer
//!
//! Every step of a conversion is a `git` or `git svn` invocation. This module
//! puts those invocations behind the [Runner] trait so the conversion logic
//! can be driven either by real processes or by an in-memory mirror.
//!
//! # Overview
//!
//! - [system::SystemRunner]: spawns real processes, inheriting stdio
//! - [mock::MockRunner]: simulates a git-svn mirror for testing
//!
//! Conversion code should depend on the [Runner] trait rather than a
//! concrete implementation.
//!
//! ```rust
//! # use svn2git::runner::Runner;
//! # fn example<R: Runner>(runner: &R) -> svn2git::Result<()> {
//! let listing = runner.output(&["git", "branch", "-r"])?;
//! runner.run(&["git", "checkout", "trunk"])?;
//! # let _ = listing;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use crate::error::Result;

/// Execute-or-abort abstraction over external commands
///
/// `argv[0]` is the program, the rest are its arguments. Implementors must be
/// `Send + Sync`.
///
/// ## Error Handling
///
/// [Runner::run] and [Runner::output] treat a non-zero exit as fatal and
/// return [crate::error::Svn2GitError::CommandFailed] carrying the command
/// line and exit code. [Runner::succeeds] never fails; it only reports
/// whether the command exited zero.
pub trait Runner: Send + Sync {
    /// Run a command with inherited standard streams
    ///
    /// # Returns
    /// * `Ok(())` - The command exited zero
    /// * `Err` - The command could not be spawned or exited non-zero
    fn run(&self, argv: &[&str]) -> Result<()>;

    /// Run a command and capture its standard output
    ///
    /// Standard error stays attached to the terminal. Same failure contract
    /// as [Runner::run].
    fn output(&self, argv: &[&str]) -> Result<String>;

    /// Run a command purely as a status probe
    ///
    /// Output is discarded. Spawn failures count as `false`.
    fn succeeds(&self, argv: &[&str]) -> bool;
}

/// Render an argv as a shell-like command line for logs and errors.
///
/// Arguments that are empty or contain whitespace are single-quoted.
pub fn command_line(argv: &[&str]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("'{}'", arg)
            } else {
                (*arg).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
