use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text::capitalize_first;

pub const MAX_HISTORY: usize = 5;

/// Recent searches, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SearchHistory {
    names: Vec<String>,
}

impl SearchHistory {
    pub fn from_names(names: Vec<String>) -> Self {
        let mut history = Self::default();
        for name in names.into_iter().rev() {
            history.push(&name);
        }
        history
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let lower = name.to_lowercase();
        self.names.retain(|existing| existing.to_lowercase() != lower);
        self.names.insert(0, capitalize_first(name));
        self.names.truncate(MAX_HISTORY);
    }

    /// Appends `older` behind the current entries; current names win on duplicates.
    pub fn merge_older(&mut self, older: SearchHistory) {
        let mut names = std::mem::take(&mut self.names);
        names.extend(older.names);
        *self = Self::from_names(names);
    }
}

pub async fn save_history(path: &Path, history: &SearchHistory) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create history directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(history)
        .map_err(|e| format!("Failed to serialize history: {}", e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| format!("Failed to write history file: {}", e))
}

pub async fn load_history(path: &Path) -> Result<SearchHistory, String> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read history file: {}", e))?;
    let names: Vec<String> =
        serde_json::from_str(&json).map_err(|e| format!("History file corrupted: {}", e))?;
    Ok(SearchHistory::from_names(names))
}

/// Missing or unreadable history starts empty.
pub async fn load_history_or_default(path: &Path) -> SearchHistory {
    match load_history(path).await {
        Ok(history) => history,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "starting with empty history");
            SearchHistory::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_dedupes_case_insensitively() {
        let mut history = SearchHistory::default();
        history.push("pikachu");
        history.push("bulbasaur");
        history.push("PIKACHU");

        assert_eq!(history.names(), ["PIKACHU", "Bulbasaur"]);
    }

    #[test]
    fn push_caps_at_five() {
        let mut history = SearchHistory::default();
        for name in ["abra", "kadabra", "alakazam", "gastly", "haunter", "gengar"] {
            history.push(name);
        }
        assert_eq!(
            history.names(),
            ["Gengar", "Haunter", "Gastly", "Alakazam", "Kadabra"]
        );
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut history = SearchHistory::default();
        history.push("   ");
        assert!(history.is_empty());
    }

    #[test]
    fn merge_keeps_current_entries_first() {
        let mut history = SearchHistory::default();
        history.push("onix");
        let older = SearchHistory::from_names(vec!["Mew".into(), "Onix".into(), "Abra".into()]);

        history.merge_older(older);

        assert_eq!(history.names(), ["Onix", "Mew", "Abra"]);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("kantodex-history-{}", std::process::id()));
        let path = dir.join("history.json");
        let mut history = SearchHistory::default();
        history.push("eevee");
        history.push("snorlax");

        save_history(&path, &history).await.unwrap();
        let loaded = load_history(&path).await.unwrap();
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = std::env::temp_dir().join(format!("kantodex-corrupt-{}.json", std::process::id()));
        tokio::fs::write(&path, "{not json").await.unwrap();

        let history = load_history_or_default(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert!(history.is_empty());
    }
}
