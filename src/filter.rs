use crate::config::FameConfig;
use crate::error::Result;
use crate::languages::LanguageTable;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Decides which repository paths get processed.
///
/// Rules apply in order and the first rejection wins:
/// exclude globs, restrict globs, the extension allow-set, the language allow-set.
#[derive(Debug, Clone)]
pub struct FileFilter {
    exclude: Option<GlobSet>,
    restrict: Option<GlobSet>,
    extensions: HashSet<String>,
    language_extensions: HashSet<String>,
}

impl FileFilter {
    pub fn new<S: AsRef<str>>(
        exclude: &[S],
        restrict: &[S],
        extensions: HashSet<String>,
        language_extensions: HashSet<String>,
    ) -> Result<Self> {
        Ok(Self {
            exclude: build_globset(exclude)?,
            restrict: build_globset(restrict)?,
            extensions,
            language_extensions,
        })
    }

    pub fn from_config(config: &FameConfig, languages: &LanguageTable) -> Result<Self> {
        let language_extensions = if config.languages.is_empty() {
            HashSet::new()
        } else {
            languages.extensions_for(&config.languages)
        };
        Self::new(
            &config.exclude,
            &config.restrict_to,
            config.extensions.iter().cloned().collect(),
            language_extensions,
        )
    }

    pub fn qualifies(&self, path: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        if let Some(restrict) = &self.restrict {
            if !restrict.is_match(path) {
                return false;
            }
        }
        let ext = file_extension(path);
        if !self.extensions.is_empty() && !self.extensions.contains(ext) {
            return false;
        }
        if !self.language_extensions.is_empty() && !self.language_extensions.contains(ext) {
            return false;
        }
        true
    }
}

/// `*` stays within one path component, like shell globbing.
fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            GlobBuilder::new(pattern.as_ref())
                .literal_separator(true)
                .build()?,
        );
    }
    Ok(Some(builder.build()?))
}

/// Suffix of the last path component starting at its final dot, dot included.
/// `src/main.go` gives `.go`, `.gitignore` gives `.gitignore`, `Makefile` gives `""`.
pub fn file_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn no_globs() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let filter = FileFilter::new(&no_globs(), &no_globs(), set(&[]), set(&[])).unwrap();
        assert!(filter.qualifies("a.go"));
        assert!(filter.qualifies("dir/Makefile"));
    }

    #[test]
    fn exclude_wins_over_restrict() {
        let exclude = vec!["*.go".to_string()];
        let restrict = vec!["*.go".to_string()];
        let filter = FileFilter::new(&exclude, &restrict, set(&[]), set(&[])).unwrap();
        assert!(!filter.qualifies("main.go"));
    }

    #[test]
    fn restrict_requires_a_match() {
        let restrict = vec!["src/*".to_string(), "*.md".to_string()];
        let filter = FileFilter::new(&no_globs(), &restrict, set(&[]), set(&[])).unwrap();
        assert!(filter.qualifies("src/lib.rs"));
        assert!(filter.qualifies("README.md"));
        assert!(!filter.qualifies("tests/cli.rs"));
    }

    #[test]
    fn star_does_not_cross_directories() {
        let exclude = vec!["*.go".to_string()];
        let filter = FileFilter::new(&exclude, &no_globs(), set(&[]), set(&[])).unwrap();
        assert!(!filter.qualifies("main.go"));
        assert!(filter.qualifies("cmd/main.go"));
    }

    #[test]
    fn extension_allow_sets_are_both_enforced() {
        let filter =
            FileFilter::new(&no_globs(), &no_globs(), set(&[".go", ".md"]), set(&[".go"])).unwrap();
        assert!(filter.qualifies("a.go"));
        assert!(!filter.qualifies("README.md"));
        assert!(!filter.qualifies("Makefile"));
    }

    #[test]
    fn malformed_glob_is_fatal() {
        let exclude = vec!["[unclosed".to_string()];
        assert!(FileFilter::new(&exclude, &no_globs(), set(&[]), set(&[])).is_err());
    }

    #[test]
    fn filter_from_config_resolves_languages() {
        let table = LanguageTable::from_json(
            r#"[{"name":"Go","type":"programming","extensions":[".go"]}]"#,
        )
        .unwrap();
        let config = FameConfig::new(".").with_languages(["go"]);
        let filter = FileFilter::from_config(&config, &table).unwrap();
        assert!(filter.qualifies("x/y.go"));
        assert!(!filter.qualifies("x/y.rs"));
    }

    #[test]
    fn extension_takes_the_last_component() {
        assert_eq!(file_extension("src/main.go"), ".go");
        assert_eq!(file_extension("a.b/Makefile"), "");
        assert_eq!(file_extension(".gitignore"), ".gitignore");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
    }
}
