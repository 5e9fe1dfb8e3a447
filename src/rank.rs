use crate::config::SortKey;
use crate::model::AuthorStats;
use std::cmp::Ordering;

impl SortKey {
    /// Numeric fields in comparison order for this key, highest priority first.
    fn fields(self, s: &AuthorStats) -> [u64; 3] {
        match self {
            SortKey::Lines => [s.lines, s.commits, s.files],
            SortKey::Commits => [s.commits, s.lines, s.files],
            SortKey::Files => [s.files, s.lines, s.commits],
        }
    }

    /// Numbers descending in key priority, then name ascending.
    pub fn compare(self, a: &AuthorStats, b: &AuthorStats) -> Ordering {
        self.fields(b)
            .cmp(&self.fields(a))
            .then_with(|| a.name.cmp(&b.name))
    }
}

pub fn rank(mut stats: Vec<AuthorStats>, key: SortKey) -> Vec<AuthorStats> {
    stats.sort_by(|a, b| key.compare(a, b));
    stats
}
