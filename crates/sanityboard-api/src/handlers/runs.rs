//! Leaderboard listing and per-run detail.

use crate::types::{error_response, FailedRun, LeaderboardResponse, RunsQuery};
use crate::ApiState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sanityboard_lib::{order_runs, overview_counts};
use tracing::{error, info};

/// List all runs, ranked by weighted score then date, with overview counts.
///
/// Counts are computed over every successfully loaded run before any
/// projection, so a narrowed view still shows the full corpus size. Runs
/// that failed to load are reported alongside, never silently dropped.
pub async fn list_runs(
    State(state): State<ApiState>,
    Query(query): Query<RunsQuery>,
) -> Json<LeaderboardResponse> {
    let report = state.store.load_all();

    let mut runs = report.runs;
    let stats = overview_counts(&runs);
    order_runs(&mut runs);

    if let Some(filter) = query.to_filter() {
        runs = filter.apply(&runs);
    }

    let failures = report
        .failures
        .into_iter()
        .map(|f| FailedRun {
            id: f.id,
            error: f.error.to_string(),
        })
        .collect();

    info!(runs = runs.len(), "serving leaderboard");
    Json(LeaderboardResponse {
        runs,
        stats,
        failures,
    })
}

/// Fetch a single run by identifier.
pub async fn get_run(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.load_run(&id) {
        Ok(run) => Json(run).into_response(),
        Err(e) if e.is_not_found() => {
            info!(run = %id, "run not found");
            error_response(StatusCode::NOT_FOUND, format!("run `{id}` not found")).into_response()
        }
        Err(e) => {
            error!(run = %id, "failed to load run: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
