use crate::config::{FameConfig, IdentityMode, OutputFormat, SortKey};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitfame")]
#[command(about = "Per-author line, commit and file statistics for a git repository")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Path to git repository (defaults to the current directory)")]
    pub repository: Option<PathBuf>,

    #[arg(long, default_value = "HEAD", help = "Revision to analyze")]
    pub revision: String,

    #[arg(long, value_enum, default_value_t = SortKey::Lines, help = "Primary sort key")]
    pub order_by: SortKey,

    #[arg(long, help = "Credit committers instead of authors")]
    pub use_committer: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tabular, help = "Output format")]
    pub format: OutputFormat,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Only count files with these extensions, e.g. '.go,.md'"
    )]
    pub extensions: Vec<String>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Only count files of these languages, e.g. 'go,markdown'"
    )]
    pub languages: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Skip files matching any of these globs")]
    pub exclude: Vec<String>,

    #[arg(
        long = "restrict-to",
        value_delimiter = ',',
        help = "Only count files matching at least one of these globs"
    )]
    pub restrict_to: Vec<String>,

    #[arg(
        short = 'j',
        long = "jobs",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Number of files processed concurrently"
    )]
    pub jobs: u16,

    #[arg(long, help = "JSON file mapping language names to extensions")]
    pub languages_file: Option<PathBuf>,

    #[arg(long, help = "Show a progress bar on stderr")]
    pub progress: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn config(&self) -> Result<FameConfig> {
        let repository = match &self.repository {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        let identity = if self.use_committer {
            IdentityMode::Committer
        } else {
            IdentityMode::Author
        };

        Ok(FameConfig::new(repository)
            .with_revision(self.revision.clone())
            .with_identity(identity)
            .with_sort_key(self.order_by)
            .with_format(self.format)
            .with_extensions(&self.extensions)
            .with_languages(self.languages.iter().cloned())
            .with_exclude(self.exclude.iter().cloned())
            .with_restrict_to(self.restrict_to.iter().cloned())
            .with_workers(usize::from(self.jobs))
            .with_languages_file(self.languages_file.clone())
            .with_progress(self.progress))
    }

    pub fn execute(self) -> Result<()> {
        let config = self.config()?;
        crate::fame::exec(&config)
    }
}
