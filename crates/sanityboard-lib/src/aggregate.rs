//! Overview counts and the default leaderboard ordering.

use chrono::{DateTime, NaiveDate};
use sanityboard_types::Run;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Headline numbers shown above the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct OverviewCounts {
    pub total_runs: usize,
    pub total_agents: usize,
    pub total_models: usize,
    pub total_languages: usize,
}

/// Distinct agents, models, and languages across all runs.
///
/// Distinctness is exact, case-sensitive string equality; normalizing
/// spelling is the producing harness's job. Languages come from the keys of
/// each run's per-language stats breakdown.
pub fn overview_counts(runs: &[Run]) -> OverviewCounts {
    let agents: HashSet<&str> = runs.iter().map(|r| r.metadata.agent_name.as_str()).collect();
    let models: HashSet<&str> = runs.iter().map(|r| r.metadata.model_name.as_str()).collect();
    let languages: HashSet<&str> = runs
        .iter()
        .filter_map(|r| r.stats.as_ref()?.by_language.as_ref())
        .flat_map(|by_language| by_language.keys().map(String::as_str))
        .collect();

    OverviewCounts {
        total_runs: runs.len(),
        total_agents: agents.len(),
        total_models: models.len(),
        total_languages: languages.len(),
    }
}

/// Default leaderboard order: weighted score descending, then run date
/// descending. The sort is stable, so further ties keep input order.
pub fn order_runs(runs: &mut [Run]) {
    runs.sort_by(|a, b| {
        b.weighted_score()
            .total_cmp(&a.weighted_score())
            .then_with(|| run_timestamp(b).cmp(&run_timestamp(a)))
    });
}

/// Run date as a unix timestamp for ordering. Accepts RFC 3339 or a plain
/// `YYYY-MM-DD`; anything else degrades to epoch 0 and sorts last among
/// runs with the same score.
pub fn run_timestamp(run: &Run) -> i64 {
    parse_run_date(&run.metadata.run_date).unwrap_or_else(|| {
        debug!(run = %run.id, date = %run.metadata.run_date, "unparseable run date, sorting as epoch");
        0
    })
}

pub fn parse_run_date(date: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}
