use serde_derive::Serialize;

/// Counters accumulated over a stage run and reported in the final summary.
/// Workers keep their own instance and fold it into the shared one via
/// `merge` when their chunk is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScoringStats {
    pub ratings_scored: u64,
    pub records_skipped: u64,
    pub items_without_edges: u64,
    pub missing_denominators: u64,
    pub partials_emitted: u64,
    pub scores_written: u64,
}

impl ScoringStats {

    pub fn merge(&mut self, other: &ScoringStats) {
        self.ratings_scored += other.ratings_scored;
        self.records_skipped += other.records_skipped;
        self.items_without_edges += other.items_without_edges;
        self.missing_denominators += other.missing_denominators;
        self.partials_emitted += other.partials_emitted;
        self.scores_written += other.scores_written;
    }
}
