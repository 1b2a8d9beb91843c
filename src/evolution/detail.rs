use super::model::{EvolutionDetail, EvolutionEdge, EvolutionTrigger, Gender};
use crate::text::{capitalize_first, collapse_whitespace, dehyphenate, title_case};

/// Condition text for one evolution trigger.
///
/// The primary condition is chosen in a fixed order: an item being used,
/// then a minimum level, then trade, then the level-up variants, then the
/// trigger's own name. Held item, gender and known move follow as modifiers.
pub fn format_evolution_detail(detail: &EvolutionDetail) -> String {
    let primary = primary_condition(detail);
    let modifiers = modifiers(detail);

    let text = match (primary.is_empty(), modifiers.is_empty()) {
        (_, true) => primary,
        (false, false) => format!("{primary} + ({})", modifiers.join(", ")),
        (true, false) => modifiers.join(", "),
    };
    collapse_whitespace(&text)
}

/// Condition text for an edge: its alternative triggers joined with ` OR `.
pub fn format_transition(edge: &EvolutionEdge) -> String {
    edge.details
        .iter()
        .map(format_evolution_detail)
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn primary_condition(detail: &EvolutionDetail) -> String {
    if let (EvolutionTrigger::UseItem, Some(item)) = (&detail.trigger, &detail.item) {
        return format!("Using {}", title_case(item));
    }
    if let Some(level) = detail.min_level {
        return format!("LV {level}");
    }
    match &detail.trigger {
        EvolutionTrigger::Trade => "Trade".to_string(),
        EvolutionTrigger::LevelUp => {
            if let Some(happiness) = detail.min_happiness {
                format!("Happiness {happiness}+")
            } else if let Some(time) = &detail.time_of_day {
                format!("Level Up (Time: {time})")
            } else {
                "Level Up (Condition)".to_string()
            }
        }
        other => capitalize_first(&dehyphenate(other.name())),
    }
}

fn modifiers(detail: &EvolutionDetail) -> Vec<String> {
    let mut modifiers = Vec::new();
    if let Some(item) = &detail.held_item {
        let item = item.strip_suffix("-item").unwrap_or(item);
        modifiers.push(format!("Holding {}", dehyphenate(item)));
    }
    match detail.gender {
        Some(Gender::Female) => modifiers.push("♀ Female".to_string()),
        Some(Gender::Male) => modifiers.push("♂ Male".to_string()),
        None => {}
    }
    if let Some(known_move) = &detail.known_move {
        modifiers.push(format!("Move: {}", dehyphenate(known_move)));
    }
    modifiers
}
