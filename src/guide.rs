//! Bundled FireRed/LeafGreen guides: TMs, HMs and items.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text::dehyphenate;

pub const TM_FILE: &str = "tms_frlg.json";
pub const HM_FILE: &str = "hms_frlg.json";
pub const ITEM_FILE: &str = "itens_frlg.json";

/// Item categories in display order; anything else sorts after, by name.
pub const ITEM_CATEGORY_ORDER: [&str; 9] = [
    "Poké Ball",
    "Healing",
    "Nutritional",
    "Evolution",
    "Battle",
    "Held",
    "Berry",
    "Misc",
    "Key Item",
];

const DEFAULT_CATEGORY: &str = "Misc";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GuideKind {
    #[default]
    Tms,
    Hms,
    Items,
}

impl GuideKind {
    pub fn next(&self) -> Self {
        match self {
            GuideKind::Tms => GuideKind::Hms,
            GuideKind::Hms => GuideKind::Items,
            GuideKind::Items => GuideKind::Tms,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GuideKind::Tms => "TMs",
            GuideKind::Hms => "HMs",
            GuideKind::Items => "Items",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MachineEntry {
    pub name: String,
    #[serde(rename = "move")]
    pub move_id: Option<String>,
    #[serde(default)]
    pub move_name: String,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    #[serde(default)]
    pub location: String,
}

impl MachineEntry {
    fn with_move_name(mut self) -> Self {
        self.move_name = self
            .move_id
            .as_deref()
            .map(dehyphenate)
            .unwrap_or_else(|| "Unknown".to_string());
        self
    }

    pub fn type_label(&self) -> String {
        self.move_type
            .as_deref()
            .unwrap_or("normal")
            .to_uppercase()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub location: String,
}

impl ItemEntry {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GuideData {
    pub tms: Vec<MachineEntry>,
    pub hms: Vec<MachineEntry>,
    pub items: Vec<ItemEntry>,
}

impl GuideData {
    pub fn is_empty(&self) -> bool {
        self.tms.is_empty() && self.hms.is_empty() && self.items.is_empty()
    }

    pub fn machines(&self, kind: GuideKind) -> &[MachineEntry] {
        match kind {
            GuideKind::Tms => &self.tms,
            GuideKind::Hms => &self.hms,
            GuideKind::Items => &[],
        }
    }
}

/// Loads all three guide files; if any of them fails, every guide is empty.
pub async fn load_guides(dir: &Path) -> GuideData {
    let tms_path = dir.join(TM_FILE);
    let hms_path = dir.join(HM_FILE);
    let items_path = dir.join(ITEM_FILE);
    let loaded = tokio::try_join!(
        read_json::<Vec<MachineEntry>>(&tms_path),
        read_json::<Vec<MachineEntry>>(&hms_path),
        read_json::<Vec<ItemEntry>>(&items_path),
    );
    match loaded {
        Ok((tms, hms, items)) => GuideData {
            tms: tms.into_iter().map(MachineEntry::with_move_name).collect(),
            hms: hms.into_iter().map(MachineEntry::with_move_name).collect(),
            items,
        },
        Err(error) => {
            tracing::warn!(dir = %dir.display(), %error, "guide data unavailable");
            GuideData::default()
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Entries whose JSON form contains `filter`, case-insensitively.
pub fn filter_entries<'a, T: Serialize>(entries: &'a [T], filter: &str) -> Vec<&'a T> {
    let needle = filter.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            needle.is_empty()
                || serde_json::to_string(entry)
                    .map(|json| json.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

/// Items grouped by category in [`ITEM_CATEGORY_ORDER`].
pub fn group_items<'a>(items: &[&'a ItemEntry]) -> Vec<(String, Vec<&'a ItemEntry>)> {
    let mut groups: Vec<(String, Vec<&'a ItemEntry>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(name, _)| name == item.category()) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category().to_string(), vec![item])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| category_rank(a).cmp(&category_rank(b)).then_with(|| a.cmp(b)));
    groups
}

fn category_rank(name: &str) -> usize {
    ITEM_CATEGORY_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(ITEM_CATEGORY_ORDER.len())
}
