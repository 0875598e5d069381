//! Display label resolution for dotted field paths

use crate::schema::Schema;

/// Resolve the display label for a dotted field path.
///
/// Array indices are stripped before lookup, so `tags.0.name` resolves the
/// same way as `tags.name`. A custom label from the schema wins; otherwise the
/// last field name is turned into title-cased words.
pub fn resolve_label(path: &str, schema: &Schema) -> String {
    let cleaned: String = path.chars().filter(|c| !c.is_ascii_digit()).collect();
    let segments: Vec<&str> = cleaned.split('.').filter(|s| !s.is_empty()).collect();

    if let Some(label) = schema.custom_label(&segments.join(".")) {
        return label.to_string();
    }

    segments
        .last()
        .map(|field| capitalize_key(field))
        .unwrap_or_default()
}

/// Turn a field name into space-separated title-cased words
/// (`user_first_name` -> `User First Name`, `firstName` -> `First Name`)
pub fn capitalize_key(field: &str) -> String {
    split_words(field)
        .iter()
        .map(|word| capitalize_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Split on separators, lower-to-upper transitions, acronym ends
/// (`HTTPServer` -> `HTTP`, `Server`) and letter/digit transitions
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower)
                || (prev.is_numeric() != c.is_numeric());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}
