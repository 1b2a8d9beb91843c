use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{SelectList, SelectListBehavior, SelectListProps};

use super::sprite_view::render_sprite;
use super::theme::{dim, heading, list_style, ACCENT_GOLD, BG_PANEL, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::evolution::{ChainOutcome, RenderSegment};
use crate::lookup::Section;
use crate::sprite::SpriteCache;
use crate::text::shout;

const SPRITE_COLUMN: u16 = 26;

/// Evolution chain as a selectable list beside the highlighted stage's sprite.
/// Enter searches the highlighted stage.
pub struct EvolutionView {
    list: SelectList,
}

pub struct EvolutionViewProps<'a> {
    pub evolution: &'a Section<ChainOutcome>,
    pub sprites: &'a SpriteCache,
    pub selected: usize,
    pub is_focused: bool,
}

impl EvolutionView {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl Default for EvolutionView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn segment_line(segment: &RenderSegment) -> Line<'static> {
    let stage = &segment.stage;
    let mut spans = Vec::new();
    match (&segment.transition, segment.branch) {
        (None, _) => {}
        (Some(transition), false) => {
            spans.push(Span::styled(format!("  -> {transition}: "), dim()));
        }
        (Some(transition), true) => {
            let marker = if segment.opens_branch { "BRANCH +" } else { "       +" };
            spans.push(Span::styled(format!("{marker} {transition}: "), dim()));
        }
    }
    let name_style = if stage.is_searched {
        Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    spans.push(Span::styled(
        format!("#{:03} {}", stage.id, shout(&stage.name)),
        name_style,
    ));
    Line::from(spans)
}

fn outcome_message(evolution: &Section<ChainOutcome>) -> Option<String> {
    match evolution {
        Section::Unavailable(message) => Some(message.clone()),
        Section::Ready(ChainOutcome::NoChain) => Some("No evolution chain found.".to_string()),
        Section::Ready(ChainOutcome::OutOfGeneration) => {
            Some("This Pokémon does not belong to Generation 1 (Kanto).".to_string())
        }
        Section::Ready(ChainOutcome::Segments(segments)) if segments.is_empty() => {
            Some("No Kanto stages in this chain.".to_string())
        }
        Section::Ready(ChainOutcome::Segments(_)) => None,
    }
}

fn segment_items(evolution: &Section<ChainOutcome>) -> Vec<Line<'static>> {
    match evolution {
        Section::Ready(ChainOutcome::Segments(segments)) => {
            segments.iter().map(segment_line).collect()
        }
        _ => Vec::new(),
    }
}

impl Component<Action> for EvolutionView {
    type Props<'a> = EvolutionViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let items = segment_items(props.evolution);
        if items.is_empty() {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Enter {
                return vec![Action::UiEvolutionOpen];
            }
        }
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::UiEvolutionSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("EVOLUTION (KANTO)")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(message) = outcome_message(props.evolution) {
            frame.render_widget(
                Paragraph::new(message)
                    .style(dim())
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(SPRITE_COLUMN)])
            .split(inner);
        let items = segment_items(props.evolution);
        let selected = props.selected.min(items.len().saturating_sub(1));
        if let Section::Ready(ChainOutcome::Segments(segments)) = props.evolution {
            render_stage_sprite(frame, columns[1], props.sprites, segments.get(selected));
        }

        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected,
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::UiEvolutionSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, columns[0], list_props);
    }
}

fn render_stage_sprite(
    frame: &mut Frame,
    area: Rect,
    sprites: &SpriteCache,
    segment: Option<&RenderSegment>,
) {
    let title = segment
        .map(|segment| shout(&segment.stage.name))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::LEFT)
        .title(Span::styled(title, heading()))
        .border_style(dim());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let url = segment.map(|segment| segment.stage.sprite_url.as_str());
    render_sprite(frame, inner, sprites, url);
}
