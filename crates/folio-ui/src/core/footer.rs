//! Footer text interpolation.

use crate::core::dom::UiElement;

/// Collapse every whitespace run to a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Write the year and copy the hero name into the footer placeholders.
pub fn fill<E: UiElement>(year: Option<&E>, name: Option<&E>, hero: Option<&E>, current_year: u32) {
    if let Some(year) = year {
        year.set_text(&current_year.to_string());
    }
    if let (Some(name), Some(hero)) = (name, hero) {
        name.set_text(&collapse_whitespace(&hero.text()));
    }
}
