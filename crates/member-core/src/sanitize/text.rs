//! Free-text and name cleaning

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// Default length bound for free-text fields
pub const DEFAULT_MAX_LENGTH: usize = 255;
/// Length bound for first/last names
pub const NAME_MAX_LENGTH: usize = 100;

/// C0 controls and DEL; tab, LF and CR are left for whitespace collapsing
static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("control character pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Anything that is not a letter/digit/underscore (any script), whitespace,
/// hyphen, apostrophe or period
static NAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-'.]").expect("name pattern is valid"));

/// Clean an untrusted string
///
/// Trims, hard-truncates to `max_length` characters, removes control
/// characters, collapses whitespace runs into one space and strips every
/// tag and attribute while keeping text content. Empty input is returned
/// unchanged.
pub fn sanitize_string(value: &str, max_length: usize) -> String {
    if value.is_empty() {
        return String::new();
    }

    let truncated: String = value.trim().chars().take(max_length).collect();
    let normalized = normalize(&truncated);
    let text = strip_markup(&normalized);

    // Entity references (`&#9;`, `&#1;`) decode into the characters removed above
    normalize(&text)
}

/// Clean a person's name
///
/// Applies [`sanitize_string`] with a 100 character bound, then keeps only
/// letters, digits, whitespace, hyphens, apostrophes and periods.
pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let cleaned = sanitize_string(name, NAME_MAX_LENGTH);
    NAME_DISALLOWED.replace_all(&cleaned, "").trim().to_string()
}

fn normalize(value: &str) -> String {
    let without_controls = CONTROL_CHARS.replace_all(value, "");
    WHITESPACE_RUN.replace_all(&without_controls, " ").into_owned()
}

/// Parse the value as an HTML fragment and keep only its text nodes
///
/// Angle brackets that survive as literal text (`&lt;b&gt;`, `a < b`) are
/// dropped so the result can never be re-read as markup.
fn strip_markup(value: &str) -> String {
    let fragment = Html::parse_fragment(value);
    let text: String = fragment.root_element().text().collect();
    text.replace(['<', '>'], "")
}
