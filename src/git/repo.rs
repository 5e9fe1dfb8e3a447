use crate::error::{FameError, Result};
use gix::{discover, ObjectId, Repository};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Work tree root (or the git dir of a bare repository).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves any rev-spec to the full hex id of the commit it points at.
    pub fn resolve_revision(&self, revision: &str) -> Result<String> {
        let peeled = format!("{revision}^{{commit}}");
        let id = self
            .repo
            .rev_parse_single(peeled.as_str())
            .map_err(|e| FameError::Parse(format!("Invalid revision '{revision}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| FameError::GitRepo(format!("'{revision}' does not name a commit")))?;

        Ok(commit.id.to_string())
    }

    /// Every file path in the tree of `commit_id`, relative to the repository root, sorted.
    /// Directories and submodule entries are left out.
    pub fn list_files(&self, commit_id: &str) -> Result<Vec<String>> {
        let oid = ObjectId::from_hex(commit_id.as_bytes())
            .map_err(|e| FameError::Parse(format!("Invalid commit ID: {e}")))?;
        let tree = self
            .repo
            .find_commit(oid)
            .map_err(|e| FameError::GitRepo(format!("Cannot load commit {commit_id}: {e}")))?
            .tree()?;

        let mut recorder = gix::traverse::tree::Recorder::default();
        tree.traverse()
            .breadthfirst(&mut recorder)
            .map_err(|e| FameError::GitRepo(format!("Failed to walk tree of {commit_id}: {e}")))?;

        let mut files: Vec<String> = recorder
            .records
            .into_iter()
            .filter(|entry| !entry.mode.is_tree() && !entry.mode.is_commit())
            .map(|entry| entry.filepath.to_string())
            .filter(|path| !path.trim().is_empty())
            .collect();
        files.sort();

        tracing::debug!(commit = %commit_id, count = files.len(), "listed files");
        Ok(files)
    }
}
