use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::theme::{
    dim, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use super::{
    Component, EvolutionView, EvolutionViewProps, GuideView, GuideViewProps, ReportView,
    ReportViewProps,
};
use crate::action::Action;
use crate::state::{AppState, Tab};

pub struct DexScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Tab strip, the active panel and the status bar.
pub struct DexScreen {
    evolution: EvolutionView,
    status_bar: StatusBar,
}

impl Default for DexScreen {
    fn default() -> Self {
        Self {
            evolution: EvolutionView::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl DexScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " KANTODEX ",
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(BG_BASE).fg(TEXT_MAIN));
        let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()).collect::<Vec<_>>())
            .select(state.tab.index())
            .block(block)
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        if state.tab == Tab::Guides {
            GuideView.render(
                frame,
                area,
                GuideViewProps {
                    guides: &state.guides,
                    kind: state.guide_kind,
                    filter: &state.guide_filter,
                    scroll: state.scroll,
                },
            );
            return;
        }

        match &state.report {
            DataResource::Empty => render_message(
                frame,
                area,
                Line::from(Span::styled(
                    "Press / to search for a Pokémon by name or number.",
                    dim(),
                )),
            ),
            DataResource::Loading => {
                let query = state.pending_query.as_deref().unwrap_or_default();
                render_message(
                    frame,
                    area,
                    Line::from(Span::styled(
                        format!("Searching {query}... {}", state.spinner()),
                        Style::default().fg(ACCENT_GOLD),
                    )),
                );
            }
            DataResource::Failed(error) => render_message(
                frame,
                area,
                Line::from(Span::styled(error.clone(), Style::default().fg(ACCENT_RED))),
            ),
            DataResource::Loaded(report) if state.tab == Tab::Evolution => {
                self.evolution.render(
                    frame,
                    area,
                    EvolutionViewProps {
                        evolution: &report.evolution,
                        sprites: &state.sprites,
                        selected: state.evolution_selected,
                        is_focused,
                    },
                );
            }
            DataResource::Loaded(report) => ReportView.render(
                frame,
                area,
                ReportViewProps {
                    report,
                    sprites: &state.sprites,
                    tab: state.tab,
                    scroll: state.scroll,
                },
            ),
        }
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = state.notice.clone().unwrap_or_else(|| match &state.report {
            DataResource::Loaded(report) => {
                format!("#{:03} {}", report.profile.id, report.profile.name)
            }
            DataResource::Loading => "Loading...".to_string(),
            _ => String::new(),
        });
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(ACCENT_GOLD),
        ))];
        let hints = status_hints(state);

        let props = StatusBarProps {
            left: StatusBarSection::items(&status_items),
            center: StatusBarSection::hints(&hints).with_separator("  "),
            right: StatusBarSection::empty(),
            style: StatusBarStyle::default(),
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

fn render_message(frame: &mut Frame, area: Rect, line: Line<'static>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    frame.render_widget(
        Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    let mut hints = vec![
        StatusBarHint::new("/", "search"),
        StatusBarHint::new("Tab", "panels"),
    ];
    match state.tab {
        Tab::Evolution => {
            hints.push(StatusBarHint::new("j/k", "stage"));
            hints.push(StatusBarHint::new("Enter", "open"));
        }
        Tab::Guides => {
            hints.push(StatusBarHint::new("g", "guide"));
            hints.push(StatusBarHint::new("j/k", "scroll"));
        }
        _ => hints.push(StatusBarHint::new("j/k", "scroll")),
    }
    if state.report.is_loaded() {
        hints.push(StatusBarHint::new("r", "reload"));
    }
    hints.push(StatusBarHint::new("q", "quit"));
    hints
}

impl Component<Action> for DexScreen {
    type Props<'a> = DexScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let state = props.state;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('/') => return vec![Action::SearchOpen],
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => return vec![Action::UiTabNext],
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                return vec![Action::UiTabPrev]
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                return state
                    .report
                    .data()
                    .map(|report| Action::LookupStart(report.query.clone()))
                    .into_iter()
                    .collect();
            }
            KeyCode::Char('g') if state.tab == Tab::Guides => {
                return vec![Action::UiGuideKindNext]
            }
            _ => {}
        }

        if state.tab == Tab::Evolution {
            if let DataResource::Loaded(report) = &state.report {
                let code = match key.code {
                    KeyCode::Char('j') => KeyCode::Down,
                    KeyCode::Char('k') => KeyCode::Up,
                    other => other,
                };
                let event = EventKind::Key(crossterm::event::KeyEvent::new(code, key.modifiers));
                return self
                    .evolution
                    .handle_event(
                        &event,
                        EvolutionViewProps {
                            evolution: &report.evolution,
                            sprites: &state.sprites,
                            selected: state.evolution_selected,
                            is_focused: true,
                        },
                    )
                    .into_iter()
                    .collect();
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => vec![Action::UiScrollDown],
            KeyCode::Up | KeyCode::Char('k') => vec![Action::UiScrollUp],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, layout[0], props.state);
        self.render_body(frame, layout[1], props.state, props.is_focused);
        self.render_footer(frame, layout[2], props.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn actions_for(state: &AppState, keys: &str) -> Vec<Action> {
        let mut screen = DexScreen::new();
        screen
            .handle_event(
                &EventKind::Key(key(keys)),
                DexScreenProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn slash_opens_search() {
        let actions = actions_for(&AppState::default(), "/");
        actions.assert_count(1);
        actions.assert_first(Action::SearchOpen);
    }

    #[test]
    fn reload_needs_a_report() {
        actions_for(&AppState::default(), "r").assert_empty();
    }

    #[test]
    fn guide_key_only_on_guides_tab() {
        actions_for(&AppState::default(), "g").assert_empty();
        let state = AppState {
            tab: Tab::Guides,
            ..Default::default()
        };
        actions_for(&state, "g").assert_first(Action::UiGuideKindNext);
    }

    #[test]
    fn unfocused_ignores_keys() {
        let state = AppState::default();
        let actions: Vec<_> = DexScreen::new()
            .handle_event(
                &EventKind::Key(key("q")),
                DexScreenProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn render_empty_prompt() {
        let mut render = RenderHarness::new(80, 20);
        let state = AppState::default();
        let output = render.render_to_string_plain(|frame| {
            DexScreen::new().render(
                frame,
                frame.area(),
                DexScreenProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("KANTODEX"));
        assert!(output.contains("Press / to search"));
    }

    #[test]
    fn render_failure_message() {
        let mut render = RenderHarness::new(80, 20);
        let state = AppState {
            report: DataResource::Failed("Pokémon \"missingno\" not found.".into()),
            ..Default::default()
        };
        let output = render.render_to_string_plain(|frame| {
            DexScreen::new().render(
                frame,
                frame.area(),
                DexScreenProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("missingno"));
    }
}
