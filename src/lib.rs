pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod fame;
pub mod filter;
pub mod git;
pub mod languages;
pub mod model;
pub mod parse;
pub mod pool;
pub mod rank;
pub mod report;

pub use config::{FameConfig, IdentityMode, OutputFormat, SortKey};
pub use error::{FameError, Result};
pub use model::{AttributionEvent, AuthorStats, FileTask, RepoContext};
