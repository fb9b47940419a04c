//! Response previewing
//!
//! Keeps provider error bodies short enough for logs and failure messages.

use crate::constants::ui::ERROR_PREVIEW_LENGTH;

/// Truncate string for error preview (safe handling of multibyte characters)
pub fn truncate_for_preview(s: &str) -> String {
    let s = s.trim();
    if s.len() <= ERROR_PREVIEW_LENGTH {
        return s.to_string();
    }
    // Find the last char boundary that does not exceed max_len
    let boundary = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= ERROR_PREVIEW_LENGTH)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..boundary])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        let short = "This is a short string";
        assert_eq!(truncate_for_preview(short), short);
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(600);
        let result = truncate_for_preview(&long);

        assert!(result.ends_with("..."));
        assert_eq!(result.len(), ERROR_PREVIEW_LENGTH + 3); // 500 + "..."
    }

    #[test]
    fn test_truncate_multibyte_chars() {
        // 3 bytes per character, 200 = 600 bytes > 500
        let text = "語".repeat(200);
        let result = truncate_for_preview(&text);
        assert!(result.ends_with("..."));
        assert!(result.len() <= ERROR_PREVIEW_LENGTH + 3 + 3);
    }
}
