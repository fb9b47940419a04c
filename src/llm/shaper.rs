//! Article text shaping
//!
//! Bounds each article to a character budget, preferring to cut at the last
//! sentence end or newline. Lengths are counted in `char`s, never bytes.

use std::collections::BTreeMap;

use crate::constants::shaping::{BREAKPOINT_DENOMINATOR, BREAKPOINT_NUMERATOR, ELLIPSIS_MARKER};

/// Bounds `text` to `max_chars` characters.
///
/// - Text within budget is returned unchanged.
/// - Otherwise the latest `.` or `\n` inside the first `max_chars` characters is
///   used as the cut (inclusive) if it sits at or after 80% of the budget.
/// - Failing that, the text is cut at exactly `max_chars` and
///   [`ELLIPSIS_MARKER`] is appended.
///
/// The result is never longer than `max_chars + ELLIPSIS_MARKER.chars().count()`.
///
/// # Example
/// ```
/// use wikilens::llm::shaper::shape;
///
/// assert_eq!(shape("short", 10), "short");
/// assert_eq!(shape("abcdefghij", 4), "abcd...");
/// ```
pub fn shape(text: &str, max_chars: usize) -> String {
    // 找到第 max_chars 个字符的字节边界
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let prefix = &text[..cut];

    let breakpoint = prefix
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == '.' || *c == '\n')
        .map(|(i, _)| i)
        .last();

    match breakpoint {
        Some(i) if i * BREAKPOINT_DENOMINATOR >= max_chars * BREAKPOINT_NUMERATOR => {
            prefix.chars().take(i + 1).collect()
        }
        _ => format!("{}{}", prefix, ELLIPSIS_MARKER),
    }
}

/// Shapes every entry of an article mapping; keys are preserved.
pub fn shape_articles(
    articles: &BTreeMap<String, String>,
    max_chars: usize,
) -> BTreeMap<String, String> {
    articles
        .iter()
        .map(|(lang, text)| {
            let shaped = shape(text, max_chars);
            if shaped.len() != text.len() {
                tracing::debug!(
                    "Shaped '{}' article: {} -> {} chars",
                    lang,
                    text.chars().count(),
                    shaped.chars().count()
                );
            }
            (lang.clone(), shaped)
        })
        .collect()
}
