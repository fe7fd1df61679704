//! Text normalisation and length capping shared by every copy path.
//!
//! Lengths are counted in `char`s so multi-byte input never splits a
//! code point and the ellipsis counts as one character.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Character appended when a value is cut to fit its limit.
pub const ELLIPSIS: char = '…';

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_text(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").trim().to_string()
}

/// Normalise `value` and cap it at `max_len` characters.
///
/// Over-long values are cut to `max_len - 1` characters, trailing
/// whitespace is dropped from the cut, and a single ellipsis is appended.
pub fn truncate(value: &str, max_len: usize) -> String {
    let text = normalize_text(value);
    if text.chars().count() <= max_len {
        return text;
    }
    if max_len == 0 {
        return String::new();
    }

    let cut: String = text.chars().take(max_len - 1).collect();
    let mut out = cut.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Lower-case, URL-safe slug. Returns `"offer"` when nothing survives.
pub fn slugify(value: &str) -> String {
    let lowered = normalize_text(value).to_lowercase();
    let stripped = NON_SLUG.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        "offer".to_string()
    } else {
        slug.to_string()
    }
}

/// Slug capped at `max_len` characters without an ellipsis, so the
/// result stays within the slug alphabet.
pub fn slug_segment(value: &str, max_len: usize) -> String {
    let slug = slugify(value);
    let cut: String = slug.chars().take(max_len).collect();
    let cut = cut.trim_end_matches('-');
    if cut.is_empty() {
        "offer".chars().take(max_len).collect()
    } else {
        cut.to_string()
    }
}

/// Text form of an untyped JSON scalar.
///
/// Strings pass through, numbers and `true` are rendered, while `null`,
/// `false`, arrays and objects read as empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

/// Text of `value` if it normalises to something non-empty.
pub fn non_empty_text(value: Option<&Value>) -> Option<String> {
    let text = normalize_text(&value_text(value?));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Cap every element of an untyped list.
///
/// Non-array input falls back to `fallback`. Each element is truncated to
/// `item_max_len`, empty results are dropped, and at most `max_items`
/// survive.
pub fn sanitize_string_list(
    input: Option<&Value>,
    item_max_len: usize,
    max_items: usize,
    fallback: &[String],
) -> Vec<String> {
    let values: Vec<String> = match input {
        Some(Value::Array(items)) => items.iter().map(value_text).collect(),
        _ => fallback.to_vec(),
    };

    values
        .iter()
        .map(|entry| truncate(entry, item_max_len))
        .filter(|entry| !entry.is_empty())
        .take(max_items)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  fast \n\t response  "), "fast response");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_truncate_short_value_is_normalized_only() {
        assert_eq!(truncate("  Book   now ", 40), "Book now");
    }

    #[test]
    fn test_truncate_cuts_and_appends_ellipsis() {
        let out = truncate("Emergency furnace repair tonight", 12);
        assert_eq!(out, "Emergency f…");
        assert_eq!(out.chars().count(), 12);
    }

    #[test]
    fn test_truncate_trims_space_before_ellipsis() {
        // cut lands on "Cut waste " -> trailing space dropped
        assert_eq!(truncate("Cut waste now please", 11), "Cut waste…");
    }

    #[test]
    fn test_truncate_never_exceeds_limit() {
        let long = "déjà vu ".repeat(500);
        for limit in [0usize, 1, 2, 15, 30, 40, 90, 350] {
            assert!(truncate(&long, limit).chars().count() <= limit);
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  HVAC Repair & Install!! "), "hvac-repair-install");
        assert_eq!(slugify("--a -- b--"), "a-b");
        assert_eq!(slugify("!!!"), "offer");
    }

    #[test]
    fn test_slug_segment_stays_in_alphabet() {
        let seg = slug_segment("water heater replacement", 15);
        assert_eq!(seg, "water-heater-re");
        let seg = slug_segment("water heater", 6);
        assert_eq!(seg, "water");
        assert!(seg.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_sanitize_string_list_uses_fallback_for_non_array() {
        let fallback = vec!["one".to_string(), "two".to_string()];
        let out = sanitize_string_list(Some(&json!("nope")), 30, 8, &fallback);
        assert_eq!(out, fallback);
        let out = sanitize_string_list(None, 30, 1, &fallback);
        assert_eq!(out, vec!["one".to_string()]);
    }

    #[test]
    fn test_sanitize_string_list_drops_empty_and_caps() {
        let input = json!(["", "  ", "A very long headline that overflows", 42, null, "ok", "x", "y"]);
        let out = sanitize_string_list(Some(&input), 10, 3, &[]);
        assert_eq!(out, vec!["A very lo…", "42", "ok"]);
    }
}
