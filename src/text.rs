//! Small label helpers shared by the section builders.

/// `thunder-stone` -> `thunder stone`
pub fn dehyphenate(name: &str) -> String {
    name.replace('-', " ")
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `thunder-stone` -> `Thunder Stone`
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `special-attack` -> `SPECIAL ATTACK`
pub fn shout(name: &str) -> String {
    dehyphenate(name).to_uppercase()
}

/// Collapses whitespace runs (flavor text newlines, form feeds) to one space
/// and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
