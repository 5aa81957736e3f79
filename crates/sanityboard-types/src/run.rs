use crate::{RunMetadata, RunResults, RunStats};
use serde::{Deserialize, Serialize};

/// One evaluation run, assembled from its on-disk documents.
///
/// Built fresh on every load and never mutated afterwards; `stats` and
/// `results` stay `None` when the corresponding file is absent, which is
/// distinct from a present file with zero tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    /// Directory name under the data root; opaque.
    pub id: String,
    pub metadata: RunMetadata,
    pub stats: Option<RunStats>,
    pub results: Option<RunResults>,
}

impl Run {
    /// Ranking score for leaderboard ordering; absent stats rank as zero.
    pub fn weighted_score(&self) -> f64 {
        self.stats
            .as_ref()
            .and_then(|s| s.weighted_score)
            .unwrap_or(0.0)
    }

    /// Overall pass rate; absent stats rank as zero.
    pub fn pass_rate(&self) -> f64 {
        self.stats.as_ref().and_then(|s| s.pass_rate).unwrap_or(0.0)
    }
}
