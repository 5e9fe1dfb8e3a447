use crate::error::{FameError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_TABLE: &str = include_str!("../configs/language_extensions.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub extensions: Vec<String>,
}

/// Static mapping from language name to the file extensions it covers.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: Vec<Language>,
}

impl LanguageTable {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_TABLE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            FameError::LanguageTable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&data)
    }

    /// Loads `path` when given, otherwise the table compiled into the binary.
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let languages: Vec<Language> = serde_json::from_str(data)
            .map_err(|e| FameError::LanguageTable(format!("malformed table: {e}")))?;
        Ok(Self { languages })
    }

    /// Union of the extensions of every named language. Names compare case-insensitively;
    /// names missing from the table are reported and otherwise ignored.
    pub fn extensions_for<S: AsRef<str>>(&self, names: &[S]) -> HashSet<String> {
        let mut extensions = HashSet::new();
        for name in names {
            let raw: &str = name.as_ref();
            let wanted = raw.trim().to_lowercase();
            if wanted.is_empty() {
                continue;
            }
            let mut found = false;
            for language in self
                .languages
                .iter()
                .filter(|l| l.name.to_lowercase() == wanted)
            {
                found = true;
                extensions.extend(language.extensions.iter().cloned());
            }
            if !found {
                tracing::warn!(language = %raw, "unknown language, ignoring");
            }
        }
        extensions
    }
}
