use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use super::theme::{
    dim, heading, type_color, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use super::Component;
use crate::action::Action;
use crate::guide::{filter_entries, group_items, GuideData, GuideKind, ItemEntry, MachineEntry};
use crate::text::shout;

const KINDS: [GuideKind; 3] = [GuideKind::Tms, GuideKind::Hms, GuideKind::Items];

/// TM, HM and item guides with a free-text filter.
pub struct GuideView;

pub struct GuideViewProps<'a> {
    pub guides: &'a GuideData,
    pub kind: GuideKind,
    pub filter: &'a str,
    pub scroll: u16,
}

impl Component<Action> for GuideView {
    type Props<'a> = GuideViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("FIRERED / LEAFGREEN GUIDES")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let selected = KINDS.iter().position(|kind| *kind == props.kind).unwrap_or(0);
        let tabs = Tabs::new(KINDS.iter().map(|kind| kind.title()).collect::<Vec<_>>())
            .select(selected)
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, layout[0]);

        frame.render_widget(
            Paragraph::new(guide_text(props.guides, props.kind, props.filter))
                .wrap(Wrap { trim: false })
                .scroll((props.scroll, 0)),
            layout[1],
        );
    }
}

pub fn guide_text(guides: &GuideData, kind: GuideKind, filter: &str) -> Text<'static> {
    if guides.is_empty() {
        return Text::from(Span::styled("Guide data unavailable.", dim()));
    }
    let filter = filter.trim();
    let mut lines = Vec::new();
    if !filter.is_empty() {
        lines.push(Line::from(Span::styled(format!("Filter: {filter}"), dim())));
    }

    let body = match kind {
        GuideKind::Tms | GuideKind::Hms => {
            let entries = filter_entries(guides.machines(kind), filter);
            entries.into_iter().map(machine_line).collect::<Vec<_>>()
        }
        GuideKind::Items => {
            let entries = filter_entries(&guides.items, filter);
            if filter.is_empty() {
                grouped_item_lines(&entries)
            } else {
                entries.into_iter().map(item_line).collect()
            }
        }
    };
    if body.is_empty() {
        lines.push(Line::from(format!("No entries match \"{filter}\".")));
    }
    lines.extend(body);
    Text::from(lines)
}

fn machine_line(entry: &MachineEntry) -> Line<'static> {
    let stat = |value: Option<u32>| value.map_or_else(|| "--".to_string(), |v| v.to_string());
    let type_name = entry.move_type.as_deref().unwrap_or("normal").to_lowercase();
    Line::from(vec![
        Span::styled(format!("{:<6}", entry.name), Style::default().fg(ACCENT_GOLD)),
        Span::styled(
            format!("{:<16}", entry.move_name.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<10}", entry.type_label()),
            Style::default().fg(type_color(&type_name)),
        ),
        Span::raw(format!(
            "POW {:>3}  ACC {:>3}  PP {:>2}  ",
            stat(entry.power),
            stat(entry.accuracy),
            stat(entry.pp)
        )),
        Span::styled(entry.location.clone(), dim()),
    ])
}

fn item_line(item: &ItemEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" [{}]", item.category()), Style::default().fg(ACCENT_GOLD)),
        Span::raw(format!(": {} ", item.effect)),
        Span::styled(format!("({})", item.location), dim()),
    ])
}

fn grouped_item_lines(items: &[&ItemEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (category, members) in group_items(items) {
        lines.push(Line::from(Span::styled(shout(&category), heading())));
        for item in members {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(": {} ", item.effect)),
                Span::styled(format!("({})", item.location), dim()),
            ]));
        }
        lines.push(Line::from(" "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tui_dispatch::testing::*;

    fn guides() -> GuideData {
        GuideData {
            tms: Vec::new(),
            hms: serde_json::from_value(json!([
                { "name": "HM03", "move": "surf", "move_name": "surf", "type": "Water", "power": 95, "accuracy": 100, "pp": 15, "location": "Safari Zone" },
                { "name": "HM05", "move": "flash", "move_name": "flash", "type": "Normal", "accuracy": 70, "pp": 20, "location": "Route 2" }
            ]))
            .unwrap(),
            items: serde_json::from_value(json!([
                { "name": "Potion", "type": "Healing", "effect": "Restores 20 HP", "location": "Viridian Mart" },
                { "name": "Poké Ball", "type": "Poké Ball", "effect": "Catches Pokémon", "location": "Viridian Mart" }
            ]))
            .unwrap(),
        }
    }

    fn text_of(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn machines_show_missing_power_as_dashes() {
        let text = text_of(&guide_text(&guides(), GuideKind::Hms, ""));
        assert!(text.contains("SURF"));
        assert!(text.contains("POW  --"));
    }

    #[test]
    fn unfiltered_items_are_grouped_in_order() {
        let text = text_of(&guide_text(&guides(), GuideKind::Items, ""));
        let ball = text.find("POKÉ BALL").unwrap();
        let healing = text.find("HEALING").unwrap();
        assert!(ball < healing);
    }

    #[test]
    fn filter_without_matches_says_so() {
        let text = text_of(&guide_text(&guides(), GuideKind::Hms, "dragon"));
        assert!(text.contains("No entries match \"dragon\"."));
    }

    #[test]
    fn renders_kind_tabs() {
        let mut render = RenderHarness::new(90, 12);
        let data = guides();
        let output = render.render_to_string_plain(|frame| {
            GuideView.render(
                frame,
                frame.area(),
                GuideViewProps {
                    guides: &data,
                    kind: GuideKind::Hms,
                    filter: "",
                    scroll: 0,
                },
            );
        });
        assert!(output.contains("TMs"));
        assert!(output.contains("Safari Zone"));
    }
}
