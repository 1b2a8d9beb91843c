//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::Config;
use crate::evolution::{ChainOutcome, RenderSegment};
use crate::guide::{GuideData, GuideKind};
use crate::history::SearchHistory;
use crate::lookup::{normalize_query, DexReport, Section};
use crate::sprite::SpriteCache;
use crate::suggest::{suggest, Suggestions};

pub const TICK_MS: u64 = 120;
pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Tab {
    #[default]
    Overview,
    Evolution,
    Matchups,
    Locations,
    Moves,
    Guides,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Evolution,
        Tab::Matchups,
        Tab::Locations,
        Tab::Moves,
        Tab::Guides,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Evolution => "Evolution",
            Tab::Matchups => "Matchups",
            Tab::Locations => "Locations",
            Tab::Moves => "Moves",
            Tab::Guides => "Guides",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// What the search overlay is typing into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SearchTarget {
    #[default]
    Pokemon,
    GuideFilter,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Config", label = "Settings", debug_fmt)]
    pub config: Config,

    /// Report lifecycle: Empty -> Loading -> Loaded/Failed
    #[debug(section = "Lookup", label = "Report", debug_fmt)]
    pub report: DataResource<DexReport>,

    /// Normalized query of the lookup in flight
    #[debug(section = "Lookup", label = "Pending", debug_fmt)]
    pub pending_query: Option<String>,

    #[debug(section = "View", label = "Tab", debug_fmt)]
    pub tab: Tab,

    #[debug(section = "View", label = "Scroll")]
    pub scroll: u16,

    #[debug(section = "View", label = "Evolution stage")]
    pub evolution_selected: usize,

    #[debug(section = "Guides", label = "Kind", debug_fmt)]
    pub guide_kind: GuideKind,

    #[debug(section = "Guides", label = "Filter")]
    pub guide_filter: String,

    #[debug(section = "History", label = "Recent", debug_fmt)]
    pub history: SearchHistory,

    /// Last background failure worth showing in the status bar
    #[debug(section = "View", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    #[debug(skip)]
    pub guides: GuideData,

    #[debug(skip)]
    pub roster: Vec<String>,

    /// Decoded sprites by URL; rebuilt from the network, never snapshotted
    #[debug(skip)]
    #[serde(skip)]
    pub sprites: SpriteCache,

    #[debug(skip)]
    pub tick_count: u32,

    // --- Search overlay ---
    #[debug(skip)]
    pub search_mode: bool,

    #[debug(skip)]
    pub search_target: SearchTarget,

    #[debug(skip)]
    pub search_query: String,

    #[debug(skip)]
    pub search_selected: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            report: DataResource::Empty,
            pending_query: None,
            tab: Tab::default(),
            scroll: 0,
            evolution_selected: 0,
            guide_kind: GuideKind::default(),
            guide_filter: String::new(),
            history: SearchHistory::default(),
            notice: None,
            guides: GuideData::default(),
            roster: Vec::new(),
            sprites: SpriteCache::default(),
            tick_count: 0,
            search_mode: false,
            search_target: SearchTarget::default(),
            search_query: String::new(),
            search_selected: 0,
        }
    }

    /// Suggestions under the search box; guide filtering has none.
    pub fn suggestions(&self) -> Vec<String> {
        match self.search_target {
            SearchTarget::Pokemon => match suggest(&self.search_query, &self.roster, &self.history) {
                Suggestions::History(names) | Suggestions::Matches(names) => names,
            },
            SearchTarget::GuideFilter => Vec::new(),
        }
    }

    pub fn suggestions_are_history(&self) -> bool {
        self.search_target == SearchTarget::Pokemon
            && suggest(&self.search_query, &self.roster, &self.history).is_history()
    }

    /// Stages of the loaded chain, in display order.
    pub fn evolution_segments(&self) -> &[RenderSegment] {
        match self.report.data().map(|report| &report.evolution) {
            Some(Section::Ready(ChainOutcome::Segments(segments))) => segments,
            _ => &[],
        }
    }

    /// Whether a result for `query` is the one we are waiting for.
    pub fn is_pending(&self, query: &str) -> bool {
        self.pending_query.as_deref() == Some(normalize_query(query).as_str())
    }

    /// Sprite URLs shown for the loaded report: normal, shiny, then each stage.
    pub fn report_sprite_urls(&self) -> Vec<String> {
        let Some(report) = self.report.data() else {
            return Vec::new();
        };
        let profile = &report.profile;
        profile
            .sprite
            .iter()
            .chain(profile.sprite_shiny.iter())
            .cloned()
            .chain(
                self.evolution_segments()
                    .iter()
                    .map(|segment| segment.stage.sprite_url.clone()),
            )
            .collect()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[(self.tick_count as usize) % SPINNER.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(Tab::Overview.prev(), Tab::Guides);
        assert_eq!(Tab::Guides.next(), Tab::Overview);
        assert_eq!(Tab::Evolution.next(), Tab::Matchups);
    }

    #[test]
    fn pending_match_is_normalized() {
        let state = AppState {
            pending_query: Some("mr-mime".into()),
            ..Default::default()
        };
        assert!(state.is_pending(" MR-MIME "));
        assert!(!state.is_pending("jynx"));
    }

    #[test]
    fn guide_filter_has_no_suggestions() {
        let state = AppState {
            search_target: SearchTarget::GuideFilter,
            roster: vec!["bulbasaur".into()],
            search_query: "bu".into(),
            ..Default::default()
        };
        assert!(state.suggestions().is_empty());
    }
}
