//! Text cleanup for catalog titles and comments before they are spoken.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"http[^\s]+").unwrap());
static HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[^\s]+").unwrap());
static SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static REF_MARK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>").unwrap());
static EMOJI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Extended_Pictographic}\u{FE0F}\u{200D}]+").unwrap());
static BR_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br/?>").unwrap());
static STRONG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").unwrap());

/// Frowning face is dropped outright instead of being replaced by a space.
const FROWN: &str = "\u{2639}\u{FE0F}";

/// Collapse every whitespace run into a single space.
pub fn normalize_spaces(text: &str) -> String {
    SPACE_REGEX.replace_all(text, " ").into_owned()
}

/// Strip quote marks, links, handles and emoji so the text reads well aloud.
pub fn normalize(text: &str) -> String {
    let text = text.replace(FROWN, "");
    let text = REF_MARK_REGEX.replace(&text, " ");
    let text = URL_REGEX.replace_all(&text, " ");
    let text = HANDLE_REGEX.replace_all(&text, " ");
    let text = EMOJI_REGEX.replace_all(&text, " ");
    normalize_spaces(&text)
}

/// Render markup to text, turning `<br>` into newlines and joining text
/// nodes with a space.
pub fn html_to_text(markup: &str) -> String {
    let with_breaks = BR_TAG_REGEX.replace_all(markup, "\n");
    let fragment = Html::parse_fragment(&with_breaks);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Render markup to text with text nodes concatenated as-is.
pub fn rendered_text(markup: &str) -> String {
    Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect::<String>()
}

/// Bold part of the markup if present, otherwise its first sentence.
pub fn headline(markup: &str, max_chars: usize) -> String {
    let fragment = Html::parse_fragment(markup);

    if let Some(strong) = fragment.select(&STRONG_SELECTOR).next() {
        return strong.text().collect::<Vec<_>>().join(" ");
    }

    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    let sentence = text.split('.').next().unwrap_or_default();
    truncate_chars(sentence, max_chars).to_string()
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
