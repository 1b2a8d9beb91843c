use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, highlight_substring, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle,
    Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, TextInput, TextInputProps, TextInputStyle,
};

use super::theme::dim;
use super::Component;
use crate::action::Action;
use crate::state::SearchTarget;

pub struct SearchOverlay {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct SearchOverlayProps<'a> {
    pub query: &'a str,
    pub target: SearchTarget,
    pub suggestions: &'a [String],
    /// Suggestions are recent searches rather than name matches
    pub showing_history: bool,
    pub selected: usize,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.reset();
        }
        self.was_open = is_open;
    }

    fn reset(&mut self) {
        self.input = TextInput::new();
        self.list = SelectList::new();
    }

    fn suggestion_items(suggestions: &[String], query: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(Color::Reset);
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        suggestions
            .iter()
            .map(|name| highlight_substring(name, query.trim(), base, highlight))
            .collect()
    }

    fn placeholder(target: SearchTarget) -> &'static str {
        match target {
            SearchTarget::Pokemon => "Pokémon name or number...",
            SearchTarget::GuideFilter => "Filter guides...",
        }
    }

    fn list_style(padding: Padding) -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding,
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

/// Enter picks the highlighted suggestion unless the user typed something
/// that recent searches cannot complete.
fn confirms_suggestion(props: &SearchOverlayProps<'_>) -> bool {
    !props.suggestions.is_empty() && (!props.showing_history || props.query.trim().is_empty())
}

impl Component<Action> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

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

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => {
                if confirms_suggestion(&props) {
                    return vec![Action::SearchConfirm];
                }
                return vec![(props.on_query_submit)(props.query.to_string())];
            }
            KeyCode::Down | KeyCode::Up => {
                if !props.suggestions.is_empty() {
                    let items = Self::suggestion_items(props.suggestions, props.query);
                    let list_props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: props.selected,
                        is_focused: true,
                        style: Self::list_style(Padding::xy(1, 1)),
                        behavior: SelectListBehavior::default(),
                        on_select: props.on_select,
                        render_item: &|item| item.clone(),
                    };
                    return self
                        .list
                        .handle_event(event, list_props)
                        .into_iter()
                        .collect();
                }
                return Vec::new();
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: Self::placeholder(props.target),
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let SearchOverlay {
            input, list, modal, ..
        } = self;
        let modal_area = centered_rect(60, 16, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Suggestion heading
                Constraint::Min(1),    // Suggestions
            ])
            .split(content_area);

            let input_props = TextInputProps {
                value: props.query,
                placeholder: Self::placeholder(props.target),
                is_focused: props.is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(Color::Rgb(50, 50, 60)),
                        fg: None,
                    },
                    placeholder_style: None,
                    cursor_style: None,
                },
                on_change: props.on_query_change,
                on_submit: props.on_query_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            if props.showing_history && !props.suggestions.is_empty() {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(" Recent searches:", dim()))),
                    chunks[1],
                );
            }

            let items = Self::suggestion_items(props.suggestions, props.query);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: Self::list_style(Padding::xy(1, 0)),
                behavior: SelectListBehavior::default(),
                on_select: props.on_select,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[2], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn props<'a>(query: &'a str, suggestions: &'a [String], history: bool) -> SearchOverlayProps<'a> {
        SearchOverlayProps {
            query,
            target: SearchTarget::Pokemon,
            suggestions,
            showing_history: history,
            selected: 0,
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
            on_select: Action::SearchSelect,
        }
    }

    fn press(overlay: &mut SearchOverlay, code: KeyCode, props: SearchOverlayProps<'_>) -> Vec<Action> {
        overlay
            .handle_event(&EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn enter_confirms_name_match() {
        let names = vec!["Pikachu".to_string()];
        let actions = press(&mut SearchOverlay::new(), KeyCode::Enter, props("pika", &names, false));
        assert_eq!(actions, vec![Action::SearchConfirm]);
    }

    #[test]
    fn enter_submits_typed_number() {
        let history = vec!["Mew".to_string()];
        let actions = press(&mut SearchOverlay::new(), KeyCode::Enter, props("7", &history, true));
        assert_eq!(actions, vec![Action::SearchQuerySubmit("7".into())]);
    }

    #[test]
    fn escape_closes() {
        let actions = press(&mut SearchOverlay::new(), KeyCode::Esc, props("", &[], true));
        assert_eq!(actions, vec![Action::SearchClose]);
    }
}
