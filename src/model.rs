use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Repository root and resolved revision shared by every task of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub root: PathBuf,
    pub revision: String,
}

impl RepoContext {
    pub fn new<P: Into<PathBuf>>(root: P, revision: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            revision: revision.into(),
        }
    }
}

/// One qualifying file, consumed by exactly one worker.
#[derive(Debug, Clone)]
pub struct FileTask {
    pub path: String,
    pub context: Arc<RepoContext>,
}

impl FileTask {
    pub fn new(path: impl Into<String>, context: Arc<RepoContext>) -> Self {
        Self {
            path: path.into(),
            context,
        }
    }

    pub fn root(&self) -> &Path {
        &self.context.root
    }

    pub fn revision(&self) -> &str {
        &self.context.revision
    }
}

/// A single (author, commit, lines) fact produced by a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionEvent {
    pub author: String,
    pub commit: String,
    pub lines: u64,
}

impl AttributionEvent {
    pub fn new(author: impl Into<String>, commit: impl Into<String>, lines: u64) -> Self {
        Self {
            author: author.into(),
            commit: commit.into(),
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorStats {
    pub name: String,
    pub lines: u64,
    pub commits: u64,
    pub files: u64,
}

impl AuthorStats {
    pub fn new(name: String) -> Self {
        Self {
            name,
            lines: 0,
            commits: 0,
            files: 0,
        }
    }
}
