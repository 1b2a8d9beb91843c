//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::DexError;
use crate::lookup::normalize_query;
use crate::state::{AppState, SearchTarget, Tab};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = vec![
                Effect::LoadRoster {
                    api_base: state.config.api_base.clone(),
                },
                Effect::LoadGuides {
                    dir: state.config.guide_dir.clone(),
                },
                Effect::LoadHistory {
                    path: state.config.history_path.clone(),
                },
            ];
            if let Some(query) = state.config.initial_query.clone() {
                effects.extend(start_lookup(state, &query));
            }
            DispatchResult::changed_with_many(effects)
        }

        // ===== Background data =====
        Action::RosterDidLoad(names) => {
            state.roster = names;
            DispatchResult::changed()
        }

        Action::RosterDidError(msg) => {
            state.notice = Some(format!("Suggestions unavailable: {msg}"));
            DispatchResult::changed()
        }

        Action::GuidesDidLoad(guides) => {
            if guides.is_empty() {
                state.notice = Some("Guide data unavailable".to_string());
            }
            state.guides = guides;
            DispatchResult::changed()
        }

        Action::HistoryDidLoad(history) => {
            if state.history.is_empty() {
                state.history = history;
                return DispatchResult::changed();
            }
            // A lookup finished first; its save dropped the stored names.
            state.history.merge_older(history);
            DispatchResult::changed_with(Effect::SaveHistory {
                path: state.config.history_path.clone(),
                history: state.history.clone(),
            })
        }

        Action::HistoryDidSave => DispatchResult::unchanged(),

        Action::HistoryDidError(msg) => {
            state.notice = Some(msg);
            DispatchResult::changed()
        }

        // ===== Search overlay =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_selected = 0;
            if state.tab == Tab::Guides {
                state.search_target = SearchTarget::GuideFilter;
                state.search_query = state.guide_filter.clone();
            } else {
                state.search_target = SearchTarget::Pokemon;
                state.search_query.clear();
            }
            DispatchResult::changed()
        }

        Action::SearchClose => {
            close_search(state);
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            if state.search_target == SearchTarget::GuideFilter {
                state.guide_filter = query.clone();
                state.scroll = 0;
            }
            state.search_query = query;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            let target = state.search_target;
            close_search(state);
            match target {
                SearchTarget::GuideFilter => {
                    state.guide_filter = query.trim().to_string();
                    DispatchResult::changed()
                }
                SearchTarget::Pokemon => {
                    DispatchResult::changed_with_many(start_lookup(state, &query))
                }
            }
        }

        Action::SearchSelect(index) => {
            if index < state.suggestions().len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchConfirm => {
            let Some(name) = state.suggestions().get(state.search_selected).cloned() else {
                return DispatchResult::unchanged();
            };
            close_search(state);
            DispatchResult::changed_with_many(start_lookup(state, &name))
        }

        // ===== Lookup =====
        Action::LookupStart(query) => DispatchResult::changed_with_many(start_lookup(state, &query)),

        Action::LookupDidLoad(report) => {
            if !state.is_pending(&report.query) {
                return DispatchResult::unchanged();
            }
            state.pending_query = None;
            state.history.push(&report.profile.name);
            state.report = DataResource::Loaded(report);
            state.evolution_selected = 0;
            state.scroll = 0;
            let mut effects = vec![Effect::SaveHistory {
                path: state.config.history_path.clone(),
                history: state.history.clone(),
            }];
            effects.extend(request_sprites(state));
            DispatchResult::changed_with_many(effects)
        }

        Action::LookupDidError { query, error } => {
            if !state.is_pending(&query) {
                return DispatchResult::unchanged();
            }
            state.pending_query = None;
            state.report = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Sprites =====
        Action::SpriteDidLoad { url, sprite } => {
            state.sprites.insert(url, sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { url, .. } => {
            state.sprites.mark_missing(url);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTabNext => {
            state.tab = state.tab.next();
            state.scroll = 0;
            DispatchResult::changed()
        }

        Action::UiTabPrev => {
            state.tab = state.tab.prev();
            state.scroll = 0;
            DispatchResult::changed()
        }

        Action::UiScrollDown => {
            state.scroll = state.scroll.saturating_add(1);
            DispatchResult::changed()
        }

        Action::UiScrollUp => {
            if state.scroll == 0 {
                return DispatchResult::unchanged();
            }
            state.scroll -= 1;
            DispatchResult::changed()
        }

        Action::UiGuideKindNext => {
            state.guide_kind = state.guide_kind.next();
            state.scroll = 0;
            DispatchResult::changed()
        }

        Action::UiEvolutionSelect(index) => {
            if index < state.evolution_segments().len() && index != state.evolution_selected {
                state.evolution_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiEvolutionOpen => {
            let Some(segment) = state.evolution_segments().get(state.evolution_selected) else {
                return DispatchResult::unchanged();
            };
            if segment.stage.is_searched {
                return DispatchResult::unchanged();
            }
            let name = segment.stage.name.clone();
            DispatchResult::changed_with_many(start_lookup(state, &name))
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global =====
        Action::Tick => {
            if state.report.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Puts the report into `Loading` and returns the lookup effect, or fails
/// the report right away for a blank query.
/// Load effects for report sprites not yet cached or in flight.
fn request_sprites(state: &mut AppState) -> Vec<Effect> {
    state
        .report_sprite_urls()
        .into_iter()
        .filter(|url| state.sprites.request(url))
        .map(|url| Effect::LoadSprite { url })
        .collect()
}

fn start_lookup(state: &mut AppState, query: &str) -> Vec<Effect> {
    let query = normalize_query(query);
    state.notice = None;
    if query.is_empty() {
        state.pending_query = None;
        state.report = DataResource::Failed(DexError::EmptyQuery.to_string());
        return Vec::new();
    }
    state.pending_query = Some(query.clone());
    state.report = DataResource::Loading;
    state.tick_count = 0;
    if state.tab == Tab::Guides {
        state.tab = Tab::Overview;
    }
    vec![Effect::Lookup {
        query,
        api_base: state.config.api_base.clone(),
    }]
}

fn close_search(state: &mut AppState) {
    state.search_mode = false;
    state.search_query.clear();
    state.search_selected = 0;
}
