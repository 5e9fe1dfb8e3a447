//! Parser for `git blame --incremental` output.
//!
//! The stream is a sequence of blocks terminated by a `filename <path>` marker. A block opens
//! with a hunk header `<commit> <orig-line> <final-line> <count>` and, the first time a commit
//! shows up, carries that commit's metadata including the `author <name>` and
//! `committer <name>` person lines. Later hunks of an already described commit only repeat
//! the header and the marker.
//!
//! The parser keeps one identity register that person lines overwrite. A hunk is credited when
//! its block closes, so the person lines that follow its header in the same block apply to it.
//! Hunks of a commit described earlier in the stream reuse that commit's identity.

use super::is_object_id;
use crate::config::IdentityMode;
use crate::model::AttributionEvent;
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    PathMarker,
    Person(&'a str),
    Hunk { commit: &'a str, lines: u64 },
    Other,
}

fn classify<'a>(line: &'a str, person_key: &str) -> Line<'a> {
    if line.starts_with("filename ") || line == "filename" {
        return Line::PathMarker;
    }
    if let Some(rest) = line.strip_prefix(person_key) {
        if let Some(name) = rest.strip_prefix(' ') {
            return Line::Person(name.trim());
        }
        return Line::Other;
    }
    parse_hunk_header(line).unwrap_or(Line::Other)
}

fn parse_hunk_header(line: &str) -> Option<Line<'_>> {
    let mut parts = line.split_ascii_whitespace();
    let commit = parts.next()?;
    if !is_object_id(commit) {
        return None;
    }
    let _orig: u64 = parts.next()?.parse().ok()?;
    let _start: u64 = parts.next()?.parse().ok()?;
    let lines: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Line::Hunk { commit, lines })
}

struct PendingHunk {
    commit: String,
    lines: u64,
}

/// Incremental state machine; feed lines with [`OwnershipParser::push_line`] and collect
/// events with [`OwnershipParser::finish`].
pub struct OwnershipParser {
    person_key: &'static str,
    current: String,
    pending: Option<PendingHunk>,
    commit_identities: HashMap<String, String>,
    events: Vec<AttributionEvent>,
    skipped_lines: u64,
}

impl OwnershipParser {
    pub fn new(identity: IdentityMode) -> Self {
        Self {
            person_key: identity.blame_key(),
            current: String::new(),
            pending: None,
            commit_identities: HashMap::new(),
            events: Vec::new(),
            skipped_lines: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        match classify(line, self.person_key) {
            Line::PathMarker => self.flush(),
            Line::Person(name) => {
                self.current = name.to_string();
                if let Some(pending) = &self.pending {
                    if !name.is_empty() {
                        self.commit_identities
                            .insert(pending.commit.clone(), name.to_string());
                    }
                }
            }
            Line::Hunk { commit, lines } => {
                // A header without a closing marker still ends the previous block.
                self.flush();
                self.pending = Some(PendingHunk {
                    commit: commit.to_string(),
                    lines,
                });
            }
            Line::Other => {}
        }
    }

    fn flush(&mut self) {
        let Some(hunk) = self.pending.take() else {
            return;
        };
        let author = self
            .commit_identities
            .get(&hunk.commit)
            .cloned()
            .unwrap_or_else(|| self.current.clone());
        if author.is_empty() {
            tracing::warn!(
                commit = %hunk.commit,
                lines = hunk.lines,
                "hunk has no preceding {} line, skipping",
                self.person_key
            );
            self.skipped_lines += hunk.lines;
            return;
        }
        self.events
            .push(AttributionEvent::new(author, hunk.commit, hunk.lines));
    }

    /// Lines of hunks dropped because no identity was known for them.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn finish(mut self) -> Vec<AttributionEvent> {
        self.flush();
        self.events
    }
}

/// Parses a whole ownership stream into attribution events, in stream order.
pub fn parse_ownership(stream: &str, identity: IdentityMode) -> Vec<AttributionEvent> {
    let mut parser = OwnershipParser::new(identity);
    for line in stream.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Arc;

    const C1: &str = "1111111111111111111111111111111111111111";
    const C2: &str = "2222222222222222222222222222222222222222";

    fn block(commit: &str, start: u32, count: u32, author: &str, committer: &str) -> String {
        format!(
            "{commit} {start} {start} {count}\n\
             author {author}\n\
             author-mail <{author}@example.com>\n\
             author-time 1700000000\n\
             author-tz +0000\n\
             committer {committer}\n\
             committer-mail <{committer}@example.com>\n\
             committer-time 1700000000\n\
             committer-tz +0000\n\
             summary change\n\
             filename a.go\n"
        )
    }

    fn repeat(commit: &str, start: u32, count: u32) -> String {
        format!("{commit} {start} {start} {count}\nfilename a.go\n")
    }

    #[test]
    fn credits_each_hunk_to_its_author() {
        let stream = format!(
            "{}{}",
            block(C1, 1, 2, "Alice", "Carol"),
            block(C2, 3, 3, "Bob", "Carol")
        );
        let events = parse_ownership(&stream, IdentityMode::Author);
        assert_eq!(
            events,
            vec![
                AttributionEvent::new("Alice", C1, 2),
                AttributionEvent::new("Bob", C2, 3),
            ]
        );
    }

    #[test]
    fn committer_mode_uses_committer_lines() {
        let stream = block(C1, 1, 4, "Alice", "Carol Committer");
        let events = parse_ownership(&stream, IdentityMode::Committer);
        assert_eq!(events, vec![AttributionEvent::new("Carol Committer", C1, 4)]);
    }

    #[test]
    fn repeated_commit_keeps_its_own_identity() {
        let stream = format!(
            "{}{}{}",
            block(C1, 1, 2, "Alice", "Alice"),
            block(C2, 3, 1, "Bob", "Bob"),
            repeat(C1, 4, 5)
        );
        let events = parse_ownership(&stream, IdentityMode::Author);
        assert_eq!(events[2], AttributionEvent::new("Alice", C1, 5));
        let total: u64 = events.iter().map(|e| e.lines).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn unknown_commit_falls_back_to_current_identity() {
        let stream = format!("{}{}", block(C1, 1, 2, "Alice", "Alice"), repeat(C2, 3, 7));
        let events = parse_ownership(&stream, IdentityMode::Author);
        assert_eq!(events[1], AttributionEvent::new("Alice", C2, 7));
    }

    #[test]
    fn hunk_without_identity_is_skipped() {
        let stream = format!("{}{}", repeat(C1, 1, 3), block(C2, 4, 2, "Bob", "Bob"));
        let mut parser = OwnershipParser::new(IdentityMode::Author);
        for line in stream.lines() {
            parser.push_line(line);
        }
        assert_eq!(parser.skipped_lines(), 3);
        assert_eq!(parser.finish(), vec![AttributionEvent::new("Bob", C2, 2)]);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn skipped_hunk_is_logged_as_a_warning() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let events = tracing::subscriber::with_default(subscriber, || {
            parse_ownership(&repeat(C1, 1, 3), IdentityMode::Author)
        });
        assert!(events.is_empty());

        let output = String::from_utf8(log.0.lock().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("hunk has no preceding author line, skipping"), "{output}");
        assert!(output.contains(&format!("commit={C1}")), "{output}");
        assert!(output.contains("lines=3"), "{output}");
    }

    #[test]
    fn author_mail_is_not_a_person_line() {
        assert_eq!(classify("author-mail <a@b>", "author"), Line::Other);
        assert_eq!(classify("author Alice Smith", "author"), Line::Person("Alice Smith"));
    }

    #[test]
    fn header_must_have_exactly_four_fields() {
        assert_eq!(
            classify(&format!("{C1} 1 1 3"), "author"),
            Line::Hunk { commit: C1, lines: 3 }
        );
        assert_eq!(classify(&format!("{C1} 1 1"), "author"), Line::Other);
        assert_eq!(classify("abc 1 1 3", "author"), Line::Other);
        assert_eq!(classify(&format!("{C1} 1 x 3"), "author"), Line::Other);
    }

    #[test]
    fn blank_stream_yields_nothing() {
        assert!(parse_ownership("", IdentityMode::Author).is_empty());
        assert!(parse_ownership("\n\n", IdentityMode::Author).is_empty());
    }

    #[test]
    fn line_total_matches_hunk_total() {
        let stream = format!(
            "{}{}{}{}",
            block(C1, 1, 10, "Alice", "Alice"),
            block(C2, 11, 4, "Bob", "Bob"),
            repeat(C1, 15, 6),
            repeat(C2, 21, 1)
        );
        let events = parse_ownership(&stream, IdentityMode::Author);
        let total: u64 = events.iter().map(|e| e.lines).sum();
        assert_eq!(total, 21);
    }
}
