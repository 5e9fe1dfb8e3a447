use crate::model::{AttributionEvent, AuthorStats};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct Totals {
    authors: HashMap<String, AuthorStats>,
    seen_commits: HashSet<String>,
}

impl Totals {
    fn author(&mut self, name: &str) -> &mut AuthorStats {
        self.authors
            .entry(name.to_string())
            .or_insert_with(|| AuthorStats::new(name.to_string()))
    }
}

/// Shared per-author totals for a whole run.
///
/// A commit id is credited once over the run: the first event to mention it wins, later
/// events for the same id only add lines.
#[derive(Default)]
pub struct Aggregator {
    totals: Mutex<Totals>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts collecting the events of one file.
    pub fn begin_file(&self) -> FileAccumulator<'_> {
        FileAccumulator {
            aggregator: self,
            touched: HashSet::new(),
        }
    }

    /// Adds the event's lines and, if its commit is new to the run, one commit.
    pub fn apply(&self, event: &AttributionEvent) {
        let mut totals = self.totals.lock();
        let is_new_commit = totals.seen_commits.insert(event.commit.clone());
        let stats = totals.author(&event.author);
        stats.lines += event.lines;
        if is_new_commit {
            stats.commits += 1;
        }
    }

    /// Counts one file for every author in `touched`.
    pub fn finish_file(&self, touched: &HashSet<String>) {
        if touched.is_empty() {
            return;
        }
        let mut totals = self.totals.lock();
        for author in touched {
            totals.author(author).files += 1;
        }
    }

    /// Copy of the current totals, in no particular order.
    #[cfg(test)]
    fn snapshot(&self) -> Vec<AuthorStats> {
        self.totals.lock().authors.values().cloned().collect()
    }

    pub fn into_stats(self) -> Vec<AuthorStats> {
        self.totals.into_inner().authors.into_values().collect()
    }
}

/// Events of a single file; [`FileAccumulator::finish`] flushes the file counts.
#[must_use = "call finish() so touched authors get their file counted"]
pub struct FileAccumulator<'a> {
    aggregator: &'a Aggregator,
    touched: HashSet<String>,
}

impl FileAccumulator<'_> {
    pub fn apply(&mut self, event: &AttributionEvent) {
        self.aggregator.apply(event);
        if !self.touched.contains(&event.author) {
            self.touched.insert(event.author.clone());
        }
    }

    pub fn touched(&self) -> usize {
        self.touched.len()
    }

    pub fn finish(self) {
        self.aggregator.finish_file(&self.touched);
    }
}
