use crate::error::{FameError, Result};
use crate::model::FileTask;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Produces the raw text streams the parsers consume for one file.
///
/// The scheduler only talks to this trait, so tests can serve canned fixtures instead of
/// spawning git.
pub trait HistorySource: Send + Sync {
    /// Per-line ownership stream (`git blame --incremental` format).
    fn ownership(&self, task: &FileTask) -> Result<String>;

    /// Commit log of the file (`git log --pretty=full` format).
    fn history(&self, task: &FileTask) -> Result<String>;
}

/// [`HistorySource`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.program.display(), args.join(" "));
        tracing::trace!(%command, dir = %dir.display(), "running");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| FameError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FameError::Subprocess {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HistorySource for GitCli {
    fn ownership(&self, task: &FileTask) -> Result<String> {
        self.run(
            task.root(),
            &["blame", "--incremental", task.revision(), "--", task.path.as_str()],
        )
    }

    fn history(&self, task: &FileTask) -> Result<String> {
        self.run(
            task.root(),
            &[
                "log",
                "--pretty=full",
                "--no-decorate",
                task.revision(),
                "--",
                task.path.as_str(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepoContext;
    use std::sync::Arc;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let cli = GitCli::with_program("/nonexistent/git-binary");
        let context = Arc::new(RepoContext::new(std::env::temp_dir(), "HEAD"));
        let err = cli.ownership(&FileTask::new("a.go", context)).unwrap_err();
        assert!(matches!(err, FameError::Spawn { .. }));
    }
}
