//! Text clean-up applied before feature extraction.
//!
//! Input is first cut to a byte budget on a character boundary, then reduced
//! to lower-cased letters and combining marks separated by single spaces.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default byte budget for a single input.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10_000;

/// Runs of anything that is neither a letter nor a mark.
static NON_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}]+").expect("static pattern compiles"));

/// Number of leading bytes of `text` that fit in `max_bytes` without splitting a character.
pub fn valid_utf8_length(text: &str, max_bytes: usize) -> usize {
    if text.len() <= max_bytes {
        return text.len();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Longest prefix of `text` whose UTF-8 encoding is at most `max_bytes` long.
pub fn truncate_to_valid_byte_length(text: &str, max_bytes: usize) -> &str {
    &text[..valid_utf8_length(text, max_bytes)]
}

/// Keeps letters and marks only, lower-cases them and frames the result with single spaces.
///
/// Text without any letter becomes a single space.
pub fn clean_and_lower_text(text: &str) -> String {
    let replaced = NON_LETTERS.replace_all(text, " ");
    let trimmed = replaced.trim_matches(' ');
    if trimmed.is_empty() {
        return " ".to_string();
    }

    let mut out = String::with_capacity(trimmed.len() + 2);
    out.push(' ');
    out.push_str(&trimmed.to_lowercase());
    out.push(' ');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_tags_and_punctuation() {
        assert_eq!(
            clean_and_lower_text("This has a tag in <br> it <ssss>&..///1/2@@3winter"),
            " this has a tag in br it ssss winter "
        );
        assert_eq!(
            clean_and_lower_text(
                " !This has    a tag.in\n+|iW£#   <p> hello\nit </p><ssss>&..///1/2@@3winter "
            ),
            " this has a tag in iw p hello it p ssss winter "
        );
    }

    #[test]
    fn test_clean_cjk() {
        assert_eq!(clean_and_lower_text("北京——。"), " 北京 ");
    }

    #[test]
    fn test_clean_degenerate_input() {
        assert_eq!(clean_and_lower_text(""), " ");
        assert_eq!(clean_and_lower_text("12345 !?"), " ");
        assert_eq!(clean_and_lower_text("   "), " ");
    }

    #[test]
    fn test_clean_keeps_marks() {
        // Devanagari vowel signs are marks, not letters.
        let cleaned = clean_and_lower_text("नमस्ते!");
        assert_eq!(cleaned, " नमस्ते ");
    }

    #[test]
    fn test_truncate_short_ascii_is_noop() {
        let text = "hello world";
        assert_eq!(truncate_to_valid_byte_length(text, 200), text);
        assert_eq!(valid_utf8_length(text, text.len()), text.len());
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // Two-byte characters cannot be split at an odd offset.
        let text = "жжжжж";
        assert_eq!(valid_utf8_length(text, 5), 4);
        assert_eq!(truncate_to_valid_byte_length(text, 5), "жж");

        // Four-byte characters.
        let text = "𝄞𝄞𝄞";
        assert_eq!(valid_utf8_length(text, 7), 4);
        assert_eq!(valid_utf8_length(text, 3), 0);
    }

    #[test]
    fn test_truncate_mixed_scripts() {
        let az = "a".repeat(150) + &"ə".repeat(100);
        assert_eq!(valid_utf8_length(&az, 200), 200);

        let be = "a".repeat(99) + &"ж".repeat(60);
        assert_eq!(valid_utf8_length(&be, 200), 199);

        let zh = "中".repeat(100);
        assert_eq!(valid_utf8_length(&zh, 200), 198);
    }
}
