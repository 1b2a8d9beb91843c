//! Reducer and component tests against the real store

use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};
use kantodex::{
    action::Action,
    components::{Component, DexScreen, DexScreenProps},
    config::Config,
    effect::Effect,
    guide::GuideKind,
    history::SearchHistory,
    reducer::reducer,
    state::{AppState, SearchTarget, Tab},
};

#[test]
fn test_reducer_lookup_start() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().report.is_empty());

    let result = store.dispatch(Action::LookupStart("  Pikachu ".into()));
    assert!(result.changed);
    assert!(store.state().report.is_loading());
    assert_eq!(store.state().pending_query.as_deref(), Some("pikachu"));
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::Lookup { query, .. } if query == "pikachu"
    ));
}

#[test]
fn test_lookup_uses_configured_api_base() {
    let config = Config::default().with_api_base(Some("http://localhost:9000".into()));
    let mut store = EffectStore::new(AppState::new(config), reducer);

    let result = store.dispatch(Action::LookupStart("25".into()));
    assert!(matches!(
        &result.effects[0],
        Effect::Lookup { api_base, .. } if api_base == "http://localhost:9000"
    ));
}

#[test]
fn test_tabs_wrap_around() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::UiTabPrev);
    assert_eq!(store.state().tab, Tab::Guides);
    store.dispatch(Action::UiTabNext);
    assert_eq!(store.state().tab, Tab::Overview);
}

#[test]
fn test_guide_kind_cycles() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().guide_kind, GuideKind::Tms);
    store.dispatch(Action::UiGuideKindNext);
    store.dispatch(Action::UiGuideKindNext);
    assert_eq!(store.state().guide_kind, GuideKind::Items);
    store.dispatch(Action::UiGuideKindNext);
    assert_eq!(store.state().guide_kind, GuideKind::Tms);
}

#[test]
fn test_search_open_targets_current_tab() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchOpen);
    assert!(store.state().search_mode);
    assert_eq!(store.state().search_target, SearchTarget::Pokemon);

    store.dispatch(Action::SearchClose);
    store.dispatch(Action::UiTabPrev);
    store.dispatch(Action::SearchOpen);
    assert_eq!(store.state().search_target, SearchTarget::GuideFilter);
}

#[test]
fn test_history_suggestions_confirm() {
    let state = AppState {
        history: SearchHistory::from_names(vec!["Mew".into(), "Onix".into()]),
        ..Default::default()
    };
    let mut store = EffectStore::new(state, reducer);

    store.dispatch(Action::SearchOpen);
    assert_eq!(store.state().suggestions(), vec!["Mew", "Onix"]);
    store.dispatch(Action::SearchSelect(1));

    let result = store.dispatch(Action::SearchConfirm);
    assert!(!store.state().search_mode);
    assert!(matches!(
        &result.effects[0],
        Effect::Lookup { query, .. } if query == "onix"
    ));
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = DexScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/ l", |state, event| {
        let props = DexScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(2);
    actions.assert_first(Action::SearchOpen);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = DexScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("q / j", |state, event| {
        let props = DexScreenProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_error = Action::LookupDidError {
        query: "mew".into(),
        error: "offline".into(),
    };

    assert_eq!(did_error.category(), Some("lookup_did"));
    assert_eq!(Action::LookupStart("mew".into()).category(), Some("lookup"));
    assert_eq!(Action::UiTabNext.category(), Some("ui_tab"));
    assert_eq!(Action::UiScrollDown.category(), Some("ui"));
    assert_eq!(Action::UiEvolutionOpen.category(), Some("ui_evolution"));
    assert_eq!(Action::SearchOpen.category(), Some("search"));
    assert_eq!(
        Action::SearchQueryChange("me".into()).category(),
        Some("search_query")
    );
    assert_eq!(Action::HistoryDidSave.category(), Some("history_did"));
    assert_eq!(Action::Tick.category(), None);
    assert_eq!(Action::Init.category(), None);

    assert!(did_error.is_lookup_did());
    assert!(Action::UiScrollUp.is_ui());
    assert!(Action::UiTabPrev.is_ui_tab());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::LookupStart("mew".into()),
        Action::HistoryDidLoad(SearchHistory::default()),
    ];

    assert_emitted!(actions, Action::LookupStart(_));
    assert_emitted!(actions, Action::HistoryDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::LookupDidError { .. });
}
