use crate::error::{Result, Svn2GitError};
use crate::runner::{command_line, Runner};
use crate::ui;
use std::io::ErrorKind;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Runner that spawns real processes
///
/// With `verbose` set every command is echoed before it runs. With
/// `dry_run` set, [Runner::run] only echoes the command; captured queries
/// ([Runner::output]) and probes still execute so the conversion can plan
/// against the real mirror.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    verbose: bool,
    dry_run: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool, dry_run: bool) -> Self {
        SystemRunner { verbose, dry_run }
    }

    fn command(argv: &[&str]) -> Result<Command> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Svn2GitError::usage("cannot run an empty command"))?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd)
    }

    fn check(argv: &[&str], status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }

        Err(Svn2GitError::command_failed(
            command_line(argv),
            status.code().unwrap_or(-1),
        ))
    }

    fn spawn_error(argv: &[&str], err: std::io::Error) -> Svn2GitError {
        if err.kind() == ErrorKind::NotFound {
            Svn2GitError::environment(format!(
                "'{}' was not found on PATH",
                argv.first().copied().unwrap_or_default()
            ))
        } else {
            Svn2GitError::Io(err)
        }
    }
}

impl Runner for SystemRunner {
    fn run(&self, argv: &[&str]) -> Result<()> {
        let mut cmd = Self::command(argv)?;

        if self.verbose || self.dry_run {
            ui::display_command(&command_line(argv));
        }
        if self.dry_run {
            return Ok(());
        }

        let status = cmd.status().map_err(|e| Self::spawn_error(argv, e))?;
        Self::check(argv, status)
    }

    fn output(&self, argv: &[&str]) -> Result<String> {
        let mut cmd = Self::command(argv)?;

        if self.verbose {
            ui::display_command(&command_line(argv));
        }

        let output = cmd
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(argv, e))?;

        Self::check(argv, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn succeeds(&self, argv: &[&str]) -> bool {
        let Ok(mut cmd) = Self::command(argv) else {
            return false;
        };

        let ok = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);

        debug!(command = %command_line(argv), ok, "probe");
        ok
    }
}
