//! Filesystem repository for evaluation-run directories.

use crate::error::LoadError;
use sanityboard_types::{
    schema, Run, RunMetadata, RunResults, RunStats, SchemaViolations,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

pub const METADATA_FILE: &str = "metadata.json";
pub const STATS_FILE: &str = "submission.json";
pub const RESULTS_FILE: &str = "summary.json";

/// Repository over a root directory of run directories.
///
/// Every load re-reads the filesystem; there is no cache, so a `Run` is
/// always a snapshot of on-disk state at call time.
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

/// Outcome of a batch load: one corrupt run never hides the rest.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub runs: Vec<Run>,
    pub failures: Vec<RunFailure>,
}

#[derive(Debug)]
pub struct RunFailure {
    pub id: String,
    pub error: LoadError,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Run identifiers: non-hidden directory names directly under the root.
    /// A missing root is an empty leaderboard, not an error. Sorted for
    /// deterministic batch loads; ranking order is the aggregator's job.
    pub fn list_run_ids(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.root.display(), "run root not readable: {e}");
                return Vec::new();
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().to_str()?.to_string();
                if name.starts_with('.') {
                    return None;
                }
                entry.file_type().ok()?.is_dir().then_some(name)
            })
            .collect();
        ids.sort();
        ids
    }

    /// Load one run. `metadata.json` is mandatory; `submission.json` and
    /// `summary.json` are optional but must validate when present.
    pub fn load_run(&self, id: &str) -> Result<Run, LoadError> {
        let dir = self.run_dir(id);
        if !dir.is_dir() {
            return Err(LoadError::NotFound(id.to_string()));
        }

        let metadata_path = dir.join(METADATA_FILE);
        if !metadata_path.is_file() {
            return Err(LoadError::MissingMetadata(id.to_string()));
        }
        let metadata: RunMetadata =
            read_document(&metadata_path, id, METADATA_FILE, schema::validate_metadata)?;

        let stats: Option<RunStats> =
            read_optional(&dir.join(STATS_FILE), id, STATS_FILE, schema::validate_stats)?;
        let results: Option<RunResults> = read_optional(
            &dir.join(RESULTS_FILE),
            id,
            RESULTS_FILE,
            schema::validate_results,
        )?;

        Ok(Run {
            id: id.to_string(),
            metadata,
            stats,
            results,
        })
    }

    /// Load every discovered run, isolating per-run failures so one corrupt
    /// directory does not take down the whole leaderboard.
    pub fn load_all(&self) -> LoadReport {
        let mut report = LoadReport::default();
        for id in self.list_run_ids() {
            match self.load_run(&id) {
                Ok(run) => report.runs.push(run),
                Err(e) => {
                    error!(run = %id, "failed to load run: {e}");
                    report.failures.push(RunFailure { id, error: e });
                }
            }
        }
        report
    }
}

fn read_document<T>(
    path: &Path,
    run: &str,
    file: &'static str,
    validate: fn(&Value) -> Result<T, SchemaViolations>,
) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        run: run.to_string(),
        file,
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        run: run.to_string(),
        file,
        source,
    })?;
    validate(&value).map_err(|source| LoadError::Schema {
        run: run.to_string(),
        file,
        source,
    })
}

/// Absent file is `None`; a file that exists but fails to read, parse, or
/// validate is an error, since it indicates corruption rather than an
/// expected absence.
fn read_optional<T>(
    path: &Path,
    run: &str,
    file: &'static str,
    validate: fn(&Value) -> Result<T, SchemaViolations>,
) -> Result<Option<T>, LoadError> {
    if !path.is_file() {
        return Ok(None);
    }
    read_document(path, run, file, validate).map(Some)
}
