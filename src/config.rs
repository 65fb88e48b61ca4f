//! Service settings — environment overrides with compiled-in defaults.

use std::path::PathBuf;

const DEFAULT_CACHE_DIR: &str = "storage/cache";
const DEFAULT_TEAM_FILE: &str = "storage/teams.json";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding one JSON file per cache entry.
    pub cache_dir: PathBuf,
    /// Override for the statsapi base URL; `None` uses the public host.
    pub api_base: Option<String>,
    /// Team reference snapshot exported from the reference store.
    pub team_file: PathBuf,
}

impl Settings {
    pub fn load() -> Self {
        let env_path = |var: &str, default: &str| {
            std::env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            cache_dir: env_path("DUGOUT_CACHE_DIR", DEFAULT_CACHE_DIR),
            api_base: std::env::var("DUGOUT_API_BASE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            team_file: env_path("DUGOUT_TEAM_FILE", DEFAULT_TEAM_FILE),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            api_base: None,
            team_file: PathBuf::from(DEFAULT_TEAM_FILE),
        }
    }
}
