//! Actions for the dex screen.
//!
//! Categories are inferred from the words before the verb: `UiTabNext` is
//! `ui_tab`, `UiScrollDown` is `ui`, `LookupDidLoad` is `lookup_did`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::guide::GuideData;
use crate::history::SearchHistory;
use crate::lookup::DexReport;
use crate::sprite::SpriteImage;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Load roster, guides and history; run the startup query if any
    Init,

    // ===== Background data =====
    RosterDidLoad(Vec<String>),
    RosterDidError(String),
    GuidesDidLoad(GuideData),
    HistoryDidLoad(SearchHistory),
    HistoryDidSave,
    HistoryDidError(String),

    // ===== Search overlay =====
    SearchOpen,
    SearchClose,
    SearchQueryChange(String),
    SearchQuerySubmit(String),
    /// Highlight a suggestion (by index)
    SearchSelect(usize),
    /// Look up the highlighted suggestion
    SearchConfirm,

    // ===== Lookup =====
    /// Intent: search for a Pokémon by name or id
    LookupStart(String),
    LookupDidLoad(DexReport),
    LookupDidError { query: String, error: String },

    // ===== Sprites =====
    SpriteDidLoad { url: String, sprite: SpriteImage },
    SpriteDidError { url: String, error: String },

    // ===== UI =====
    UiTabNext,
    UiTabPrev,
    UiScrollDown,
    UiScrollUp,
    UiGuideKindNext,
    /// Highlight an evolution stage (by index)
    UiEvolutionSelect(usize),
    /// Search the highlighted evolution stage
    UiEvolutionOpen,
    Render,

    // ===== Global =====
    Tick,
    Quit,
}
