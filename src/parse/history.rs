//! Parser for `git log --pretty=full` output, used for files without blame data.

use super::is_object_id;
use crate::config::IdentityMode;
use crate::model::AttributionEvent;

/// Extracts the newest commit and its credited person as a zero-line event.
///
/// Only the top entry is inspected. Returns `None` when the log is empty or the person
/// line is missing or malformed; the latter is reported as a diagnostic.
pub fn parse_history(stream: &str, identity: IdentityMode) -> Option<AttributionEvent> {
    let mut lines = stream.lines();
    let commit = lines.find_map(|line| {
        line.strip_prefix("commit ")
            .and_then(|rest| rest.split_ascii_whitespace().next())
            .filter(|id| is_object_id(id))
    })?;

    let prefix = format!("{}: ", identity.log_key());
    let person_line = lines
        .take_while(|line| !line.starts_with("commit "))
        .find_map(|line| line.strip_prefix(prefix.as_str()));

    let Some(person_line) = person_line else {
        tracing::warn!(%commit, "log entry has no {} line", identity.log_key());
        return None;
    };

    match parse_signature(person_line) {
        Some(name) => Some(AttributionEvent::new(name, commit, 0)),
        None => {
            tracing::warn!(%commit, line = %person_line, "unparseable person in log entry");
            None
        }
    }
}

/// `Jane Doe <jane@example.com>` gives `Jane Doe`.
fn parse_signature(line: &str) -> Option<&str> {
    let line = line.trim_end();
    let (name, email) = line.rsplit_once(" <")?;
    if !email.ends_with('>') {
        return None;
    }
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}
