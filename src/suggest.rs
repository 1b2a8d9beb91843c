use crate::history::SearchHistory;
use crate::text::capitalize_first;

/// Size of the roster fetched for suggestions (Kanto and Johto).
pub const ROSTER_LIMIT: u32 = 251;
pub const MAX_SUGGESTIONS: usize = 10;
const MIN_PREFIX: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suggestions {
    History(Vec<String>),
    Matches(Vec<String>),
}

impl Suggestions {
    pub fn names(&self) -> &[String] {
        match self {
            Suggestions::History(names) | Suggestions::Matches(names) => names,
        }
    }

    pub fn is_history(&self) -> bool {
        matches!(self, Suggestions::History(_))
    }
}

pub fn suggest(input: &str, roster: &[String], history: &SearchHistory) -> Suggestions {
    let prefix = input.trim().to_lowercase();
    if prefix.chars().count() < MIN_PREFIX {
        return Suggestions::History(history.names().to_vec());
    }
    Suggestions::Matches(
        roster
            .iter()
            .filter(|name| name.starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .map(|name| capitalize_first(name))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn roster() -> Vec<String> {
        ["charmander", "charmeleon", "charizard", "squirtle", "chansey"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn short_input_shows_history() {
        let mut history = SearchHistory::default();
        history.push("mew");
        assert_eq!(
            suggest(" c ", &roster(), &history),
            Suggestions::History(vec!["Mew".to_string()])
        );
    }

    #[test]
    fn prefix_matches_capitalized() {
        let suggestions = suggest("CHAR", &roster(), &SearchHistory::default());
        assert_eq!(
            suggestions.names(),
            ["Charmander", "Charmeleon", "Charizard"]
        );
        assert!(!suggestions.is_history());
    }

    #[test]
    fn matches_are_capped() {
        let roster: Vec<String> = (0..30).map(|n| format!("porygon{n}")).collect();
        let suggestions = suggest("po", &roster, &SearchHistory::default());
        assert_eq!(suggestions.names().len(), MAX_SUGGESTIONS);
    }
}
