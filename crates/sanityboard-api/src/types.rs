use axum::http::StatusCode;
use axum::response::Json;
use sanityboard_lib::{FilterState, OverviewCounts, SortDirection, SortField, ViewMode};
use sanityboard_types::Run;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Error response type
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

/// Helper function to create error responses
pub fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    let response = ErrorResponse {
        error: status.as_str().to_string(),
        message,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    (status, Json(response))
}

/// The listing payload: ordered runs, headline counts, and any runs that
/// failed to load (reported instead of silently dropped).
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub runs: Vec<Run>,
    pub stats: OverviewCounts,
    pub failures: Vec<FailedRun>,
}

#[derive(Debug, Serialize)]
pub struct FailedRun {
    pub id: String,
    pub error: String,
}

/// Optional projection parameters for the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RunsQuery {
    pub view: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub q: Option<String>,
}

impl RunsQuery {
    /// `None` when no parameter was given: the endpoint then returns the
    /// full collection in default order. Unlike the UI, the API's implicit
    /// view is `all`; unrecognized values are treated as absent.
    pub fn to_filter(&self) -> Option<FilterState> {
        if self.view.is_none() && self.sort.is_none() && self.direction.is_none() && self.q.is_none()
        {
            return None;
        }

        let mut filter = FilterState::default();
        filter.set_view(
            self.view
                .as_deref()
                .and_then(ViewMode::parse)
                .unwrap_or(ViewMode::All),
        );
        if let Some(field) = self.sort.as_deref().and_then(SortField::parse) {
            filter.sort_by = field;
            filter.direction = field.default_direction();
        }
        if let Some(direction) = self.direction.as_deref().and_then(SortDirection::parse) {
            filter.direction = direction;
        }
        if let Some(q) = &self.q {
            filter.set_search(q.clone());
        }
        Some(filter)
    }
}
