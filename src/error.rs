use thiserror::Error;

pub type Result<T> = std::result::Result<T, FameError>;

#[derive(Error, Debug)]
pub enum FameError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Subprocess {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),
    #[error("Language table error: {0}")]
    LanguageTable(String),
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for FameError {
    fn from(err: gix::discover::Error) -> Self {
        FameError::GitDiscover(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for FameError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        FameError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for FameError {
    fn from(err: gix::object::commit::Error) -> Self {
        FameError::Commit(Box::new(err))
    }
}
