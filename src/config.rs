use clap::ValueEnum;
use std::path::PathBuf;

/// Which signature of a commit gets the credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    #[default]
    Author,
    Committer,
}

impl IdentityMode {
    /// Key of the person line in `git blame --incremental` output.
    pub fn blame_key(self) -> &'static str {
        match self {
            IdentityMode::Author => "author",
            IdentityMode::Committer => "committer",
        }
    }

    /// Key of the person line in `git log --pretty=full` output.
    pub fn log_key(self) -> &'static str {
        match self {
            IdentityMode::Author => "Author",
            IdentityMode::Committer => "Commit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Lines,
    Commits,
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

/// Settings for one run. Built once and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct FameConfig {
    pub repository: PathBuf,
    pub revision: String,
    pub identity: IdentityMode,
    pub sort_key: SortKey,
    pub format: OutputFormat,
    pub extensions: Vec<String>,
    pub languages: Vec<String>,
    pub exclude: Vec<String>,
    pub restrict_to: Vec<String>,
    pub workers: usize,
    pub languages_file: Option<PathBuf>,
    pub progress: bool,
}

impl FameConfig {
    pub fn new<P: Into<PathBuf>>(repository: P) -> Self {
        Self {
            repository: repository.into(),
            revision: "HEAD".to_string(),
            identity: IdentityMode::Author,
            sort_key: SortKey::Lines,
            format: OutputFormat::Tabular,
            extensions: Vec::new(),
            languages: Vec::new(),
            exclude: Vec::new(),
            restrict_to: Vec::new(),
            workers: 1,
            languages_file: None,
            progress: false,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    pub fn with_identity(mut self, identity: IdentityMode) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_restrict_to<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restrict_to = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Worker count; zero is clamped to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_languages_file(mut self, path: Option<PathBuf>) -> Self {
        self.languages_file = path;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Turns `go`, `.go` and ` .go ` into `.go`. Blank input yields `None`.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{trimmed}"))
    }
}
