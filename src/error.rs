use thiserror::Error;

/// Unified error type for svn2git operations
#[derive(Error, Debug)]
pub enum Svn2GitError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in svn2git
pub type Result<T> = std::result::Result<T, Svn2GitError>;

impl Svn2GitError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        Svn2GitError::Usage(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        Svn2GitError::Environment(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        Svn2GitError::Config(msg.into())
    }

    /// Create a command failure for the given command line
    pub fn command_failed(command: impl Into<String>, code: i32) -> Self {
        Svn2GitError::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Process exit code this error should terminate with.
    ///
    /// Command failures propagate the child's exit code; everything else
    /// exits with 1. A child that reported 0 (or was killed and reported
    /// nothing) still maps to 1 so the run never looks successful.
    pub fn exit_code(&self) -> i32 {
        match self {
            Svn2GitError::CommandFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}
