use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::sprite_view::render_sprite;
use super::theme::{dim, heading, type_color, ACCENT_GOLD, BG_PANEL, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::locations::LocationReport;
use crate::lookup::{DexReport, Section};
use crate::sprite::SpriteCache;
use crate::state::Tab;
use crate::stats::BaseStats;
use crate::text::shout;
use crate::typechart::TypeChart;

const BAR_WIDTH: usize = 20;
const SPRITE_COLUMN: u16 = 26;

/// Text panels of a loaded report: overview, matchups, locations and moves.
pub struct ReportView;

pub struct ReportViewProps<'a> {
    pub report: &'a DexReport,
    pub sprites: &'a SpriteCache,
    pub tab: Tab,
    pub scroll: u16,
}

impl Component<Action> for ReportView {
    type Props<'a> = ReportViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.tab {
            Tab::Matchups => render_matchups(frame, area, &props.report.type_chart),
            Tab::Locations => render_panel(
                frame,
                area,
                "LOCATIONS (FIRERED)",
                locations_text(&props.report.locations),
                props.scroll,
            ),
            Tab::Moves => render_panel(frame, area, "MOVES", moves_text(props.report), props.scroll),
            _ => render_overview(frame, area, &props),
        }
    }
}

fn render_overview(frame: &mut Frame, area: Rect, props: &ReportViewProps<'_>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(SPRITE_COLUMN)])
        .split(area);
    render_panel(
        frame,
        columns[0],
        "OVERVIEW",
        overview_text(props.report),
        props.scroll,
    );

    let boxes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    let profile = &props.report.profile;
    for (area, title, url) in [
        (boxes[0], "NORMAL", profile.sprite.as_deref()),
        (boxes[1], "SHINY", profile.sprite_shiny.as_deref()),
    ] {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_sprite(frame, inner, props.sprites, url);
    }
}

fn render_panel(frame: &mut Frame, area: Rect, title: &str, text: Text<'static>, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn overview_text(report: &DexReport) -> Text<'static> {
    let profile = &report.profile;
    let mut type_spans = vec![Span::raw("Type: ")];
    for (idx, name) in profile.types.iter().enumerate() {
        if idx > 0 {
            type_spans.push(Span::raw(" / "));
        }
        type_spans.push(Span::styled(
            shout(name),
            Style::default()
                .fg(type_color(name))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}  #{:03}", shout(&profile.name), profile.id),
            heading(),
        )),
        Line::from(type_spans),
        Line::from(format!(
            "Height: {:.1} m  Weight: {:.1} kg",
            profile.height_m, profile.weight_kg
        )),
    ];
    if let Some(label) = profile.rarity.label() {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(ACCENT_GOLD),
        )));
    }
    lines.push(Line::from(" "));
    lines.extend(stat_lines(&report.stats));
    Text::from(lines)
}

fn stat_lines(stats: &BaseStats) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("BASE STATS", heading()))];
    for row in &stats.rows {
        let filled = ((row.percent / 100.0) * BAR_WIDTH as f32).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        lines.push(Line::from(vec![
            Span::raw(format!("{:<16}{:>4} ", row.label, row.value)),
            Span::styled("█".repeat(filled), Style::default().fg(ACCENT_GOLD)),
            Span::styled("░".repeat(BAR_WIDTH - filled), dim()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("{:<16}{:>4}", "TOTAL", stats.total),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines
}

fn render_matchups(frame: &mut Frame, area: Rect, chart: &Section<TypeChart>) {
    let chart = match chart {
        Section::Ready(chart) => chart,
        Section::Unavailable(message) => {
            render_panel(frame, area, "MATCHUPS", Text::from(message.clone()), 0);
            return;
        }
    };
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let defense = &chart.defense;
    let defense_text = matchup_text(&[
        ("Takes 4x from", &defense.quadruple),
        ("Takes 2x from", &defense.double),
        ("Takes 0.5x from", &defense.half),
        ("Takes 0.25x from", &defense.quarter),
        ("Immune to", &defense.immune),
    ]);
    let attack = &chart.attack;
    let attack_text = matchup_text(&[
        ("Super effective (2x) on", &attack.super_effective),
        ("Not very effective (0.5x) on", &attack.not_very_effective),
        ("No effect (0x) on", &attack.no_effect),
    ]);
    render_panel(frame, layout[0], "DEFENSE", defense_text, 0);
    render_panel(frame, layout[1], "OFFENSE", attack_text, 0);
}

fn matchup_text(sections: &[(&'static str, &Vec<String>)]) -> Text<'static> {
    let mut lines = Vec::new();
    for (label, names) in sections {
        if names.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(*label, heading())));
        let mut spans = Vec::new();
        for (idx, name) in names.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(", "));
            }
            spans.push(Span::styled(shout(name), Style::default().fg(type_color(name))));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(" "));
    }
    if lines.is_empty() {
        return Text::from("No matchup data.");
    }
    Text::from(lines)
}

fn locations_text(locations: &Section<LocationReport>) -> Text<'static> {
    match locations {
        Section::Unavailable(message) => Text::from(message.clone()),
        Section::Ready(LocationReport::NotListed) => {
            Text::from("No location data listed for this Pokémon.")
        }
        Section::Ready(LocationReport::NoEncounters) => Text::from(
            "Not found in the wild in FireRed. Obtained by event, trade or evolution.",
        ),
        Section::Ready(LocationReport::Found(entries)) => Text::from(
            entries
                .iter()
                .map(|entry| {
                    Line::from(vec![
                        Span::styled(format!("{:<30}", entry.area), Style::default().fg(TEXT_MAIN)),
                        Span::styled(format!("{:<14}", entry.method), dim()),
                        Span::styled(
                            format!("LV {}", entry.level_range()),
                            Style::default().fg(ACCENT_GOLD),
                        ),
                    ])
                })
                .collect::<Vec<_>>(),
        ),
    }
}

fn moves_text(report: &DexReport) -> Text<'static> {
    let moves = &report.moves;
    let mut lines = vec![Line::from(Span::styled("LEVEL UP", heading()))];
    if moves.level_up.is_empty() {
        lines.push(Line::from(Span::styled(
            "No level-up moves in FireRed/LeafGreen.",
            dim(),
        )));
    }
    for entry in &moves.level_up {
        lines.push(Line::from(vec![
            Span::styled(format!("LV {:>3}  ", entry.level), Style::default().fg(ACCENT_GOLD)),
            Span::raw(entry.name.clone()),
        ]));
    }
    lines.push(Line::from(" "));
    lines.push(Line::from(Span::styled("TM / HM", heading())));
    if moves.machine.is_empty() {
        lines.push(Line::from(Span::styled("No machine moves.", dim())));
    }
    lines.extend(moves.machine.iter().map(|name| Line::from(name.clone())));
    Text::from(lines)
}
