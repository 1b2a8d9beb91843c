//! Side effects declared by the reducer, run as tasks by `main`.

use std::path::PathBuf;

use crate::history::SearchHistory;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the name roster used for suggestions
    LoadRoster { api_base: String },
    LoadGuides { dir: PathBuf },
    LoadHistory { path: PathBuf },
    /// Run a full lookup for an already normalized query
    Lookup { query: String, api_base: String },
    SaveHistory { path: PathBuf, history: SearchHistory },
    /// Download and decode one sprite
    LoadSprite { url: String },
}
