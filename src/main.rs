//! Kantodex - FireRed/LeafGreen Pokédex TUI

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kantodex::action::Action;
use kantodex::api::{DataSource, PokeApiClient};
use kantodex::components::{
    Component, DexScreen, DexScreenProps, SearchOverlay, SearchOverlayProps,
};
use kantodex::config::Config;
use kantodex::effect::Effect;
use kantodex::guide::load_guides;
use kantodex::history::{load_history_or_default, save_history};
use kantodex::lookup::{describe_failure, run_lookup};
use kantodex::reducer::reducer;
use kantodex::sprite::load_sprite;
use kantodex::state::{AppState, TICK_MS};
use kantodex::suggest::ROSTER_LIMIT;
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// FireRed/LeafGreen Pokédex in the terminal
#[derive(Parser, Debug)]
#[command(name = "kantodex")]
#[command(about = "Browse Kanto Pokémon, evolutions, matchups and FRLG guides")]
struct Args {
    /// Pokémon name or number to search on startup
    #[arg(long, env = "KANTODEX_QUERY")]
    query: Option<String>,

    /// PokeAPI base URL
    #[arg(long, env = "KANTODEX_API_BASE")]
    api_base: Option<String>,

    /// Directory holding the TM, HM and item guide files
    #[arg(long, env = "KANTODEX_GUIDE_DIR")]
    guide_dir: Option<PathBuf>,

    /// Where recent searches are stored
    #[arg(long, env = "KANTODEX_HISTORY_FILE")]
    history_file: Option<PathBuf>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, env = "KANTODEX_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Screen,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Main,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            Some(DexComponentId::Screen)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Screen => DexContext::Main,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        query,
        api_base,
        guide_dir,
        history_file,
        log_file,
        verbose,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file {
        init_logging(&path, verbose)?;
    }

    let config = Config::default()
        .with_api_base(api_base)
        .with_guide_dir(guide_dir)
        .with_history_path(history_file)
        .with_initial_query(query);
    tracing::info!(api_base = %config.api_base, guides = %config.guide_dir.display(), "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: &Path, verbose: bool) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

struct DexUi {
    screen: DexScreen,
    search: SearchOverlay,
}

impl DexUi {
    fn new() -> Self {
        Self {
            screen: DexScreen::new(),
            search: SearchOverlay::new(),
        }
    }

    fn search_props<'a>(
        state: &'a AppState,
        suggestions: &'a [String],
        is_focused: bool,
    ) -> SearchOverlayProps<'a> {
        SearchOverlayProps {
            query: &state.search_query,
            target: state.search_target,
            suggestions,
            showing_history: state.suggestions_are_history(),
            selected: state.search_selected,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
            on_select: Action::SearchSelect,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::Screen, area);

        let props = DexScreenProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.screen.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 16, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            let suggestions = state.suggestions();
            let props = Self::search_props(state, &suggestions, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }
    }

    fn handle_screen_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DexScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.screen.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let suggestions = state.suggestions();
        let props = Self::search_props(state, &suggestions, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(DexComponentId::Screen, move |event, state| {
        ui_screen.borrow_mut().handle_screen_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search.borrow_mut().handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadRoster { api_base } => {
            ctx.tasks().spawn("roster", async move {
                let client = PokeApiClient::new(api_base);
                match client.fetch_name_roster(ROSTER_LIMIT).await {
                    Ok(names) => Action::RosterDidLoad(names),
                    Err(e) => Action::RosterDidError(e.to_string()),
                }
            });
        }
        Effect::LoadGuides { dir } => {
            ctx.tasks().spawn("guides", async move {
                Action::GuidesDidLoad(load_guides(&dir).await)
            });
        }
        Effect::LoadHistory { path } => {
            ctx.tasks().spawn("history", async move {
                Action::HistoryDidLoad(load_history_or_default(&path).await)
            });
        }
        Effect::Lookup { query, api_base } => {
            // Same key: a newer lookup replaces the one in flight
            ctx.tasks().spawn("lookup", async move {
                let source = Arc::new(PokeApiClient::new(api_base));
                match run_lookup(source, &query).await {
                    Ok(report) => Action::LookupDidLoad(report),
                    Err(e) => {
                        tracing::warn!(%query, error = %e, "lookup failed");
                        Action::LookupDidError {
                            error: describe_failure(&query, &e),
                            query,
                        }
                    }
                }
            });
        }
        Effect::SaveHistory { path, history } => {
            ctx.tasks().spawn("history_save", async move {
                match save_history(&path, &history).await {
                    Ok(()) => Action::HistoryDidSave,
                    Err(e) => Action::HistoryDidError(e),
                }
            });
        }
        Effect::LoadSprite { url } => {
            let key = format!("sprite_{url}");
            ctx.tasks().spawn(key, async move {
                let client = PokeApiClient::default();
                match load_sprite(&client, &url).await {
                    Ok(sprite) => Action::SpriteDidLoad { url, sprite },
                    Err(error) => {
                        tracing::warn!(%url, %error, "sprite unavailable");
                        Action::SpriteDidError { url, error }
                    }
                }
            });
        }
    }
}
