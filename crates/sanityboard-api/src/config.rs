use std::env;
use std::path::PathBuf;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding one subdirectory per run.
    pub data_dir: PathBuf,
    pub port: u16,
    /// Origin used for absolute URLs in the sitemap, without trailing slash.
    pub site_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("SANITYBOARD_DATA_DIR")
            .unwrap_or_else(|_| "eval-results".to_string())
            .into();
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let site_url = env::var("SANITYBOARD_SITE_URL")
            .unwrap_or_else(|_| "https://sanityboard.lr7.dev".to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            data_dir,
            port,
            site_url,
        }
    }
}
