//! Text-protocol parsers for the two git streams consumed per file.

pub mod history;
pub mod ownership;

pub use history::parse_history;
pub use ownership::{parse_ownership, OwnershipParser};

/// Whether `s` looks like a full object id (SHA-1 or SHA-256 hex).
pub(crate) fn is_object_id(s: &str) -> bool {
    (s.len() == 40 || s.len() == 64) && s.bytes().all(|b| b.is_ascii_hexdigit())
}
