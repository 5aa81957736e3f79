use sanityboard_types::SchemaViolations;
use thiserror::Error;

/// Everything that can go wrong while loading a run from disk.
///
/// Metadata is load-bearing: a run without a valid `metadata.json` has no
/// leaderboard row, so absence and corruption are both fatal for that run.
/// A stats or results file that is merely missing is not an error; one that
/// exists but cannot be parsed indicates corruption and is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("run `{0}` not found")]
    NotFound(String),

    #[error("run `{0}` has no metadata.json")]
    MissingMetadata(String),

    #[error("run `{run}`: {file}: {source}")]
    Schema {
        run: String,
        file: &'static str,
        source: SchemaViolations,
    },

    #[error("run `{run}`: {file} is not valid JSON: {source}")]
    Json {
        run: String,
        file: &'static str,
        source: serde_json::Error,
    },

    #[error("run `{run}`: failed to read {file}: {source}")]
    Io {
        run: String,
        file: &'static str,
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}
