//! Runtime configuration assembled from CLI flags and environment.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_BASE;

pub const APP_DIR: &str = "kantodex";
pub const HISTORY_FILE: &str = "history.json";
pub const DEFAULT_GUIDE_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub guide_dir: PathBuf,
    pub history_path: PathBuf,
    /// Searched as soon as the UI starts.
    pub initial_query: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            guide_dir: PathBuf::from(DEFAULT_GUIDE_DIR),
            history_path: default_history_path(),
            initial_query: None,
        }
    }
}

impl Config {
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base.filter(|base| !base.trim().is_empty()) {
            self.api_base = base;
        }
        self
    }

    pub fn with_guide_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.guide_dir = dir;
        }
        self
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.history_path = path;
        }
        self
    }

    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.initial_query = query
            .map(|query| query.trim().to_string())
            .filter(|query| !query.is_empty());
        self
    }
}

pub fn default_history_path() -> PathBuf {
    data_dir().join(APP_DIR).join(HISTORY_FILE)
}

fn data_dir() -> PathBuf {
    dirs_next::data_local_dir().unwrap_or_else(|| Path::new(".").to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_only_when_given() {
        let config = Config::default()
            .with_api_base(Some("http://localhost:8080/api/v2".into()))
            .with_guide_dir(None)
            .with_initial_query(Some("  ".into()));

        assert_eq!(config.api_base, "http://localhost:8080/api/v2");
        assert_eq!(config.guide_dir, PathBuf::from(DEFAULT_GUIDE_DIR));
        assert_eq!(config.initial_query, None);
    }

    #[test]
    fn history_lives_under_app_dir() {
        let path = default_history_path();
        assert!(path.ends_with(Path::new(APP_DIR).join(HISTORY_FILE)));
    }
}
