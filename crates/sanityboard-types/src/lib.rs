//! Data model for SanityHarness evaluation-run artifacts.
//!
//! One run directory on disk holds `metadata.json` (required),
//! `submission.json` and `summary.json` (optional), plus an opaque
//! `report.md`. This crate defines the typed shapes of those documents and
//! the schema validator that turns raw JSON into them.

pub mod metadata;
pub mod results;
pub mod run;
pub mod schema;
pub mod stats;

pub use metadata::*;
pub use results::*;
pub use run::*;
pub use schema::*;
pub use stats::*;
