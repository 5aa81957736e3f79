//! Request handlers for the leaderboard API.

pub mod download;
pub mod health;
pub mod runs;
pub mod sitemap;

pub use download::download_run;
pub use health::health_check;
pub use runs::{get_run, list_runs};
pub use sitemap::sitemap;
