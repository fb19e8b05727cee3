//! Shared helpers used by the post and profile renderers.

use chrono::{DateTime, Datelike, Utc};
use maud::{Markup, html};

/// Heading used for posts without a title.
pub const UNTITLED: &str = "Без назви";

/// Maximum description length, in characters.
pub const DESCRIPTION_LEN: usize = 160;

/// Month names in the genitive case, as used in "5 березня 2024 р.".
const MONTHS_GENITIVE: [&str; 12] = [
    "січня",
    "лютого",
    "березня",
    "квітня",
    "травня",
    "червня",
    "липня",
    "серпня",
    "вересня",
    "жовтня",
    "листопада",
    "грудня",
];

/// Treat empty strings like missing values.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// First `max_chars` characters of `text`, without an ellipsis.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Format a date the way the site displays it, e.g. "5 березня 2024 р.".
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!(
        "{} {} {} р.",
        date.day(),
        MONTHS_GENITIVE[date.month0() as usize],
        date.year()
    )
}

/// Render text with each newline turned into a `<br>`.
pub fn multiline(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- excerpt() tests --

    #[test]
    fn excerpt_shorter_than_max() {
        assert_eq!(excerpt("hello", 160), "hello");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        // Cyrillic letters are 2 bytes each
        assert_eq!(excerpt("привіт світ", 6), "привіт");
    }

    #[test]
    fn excerpt_exact_length() {
        let text = "a".repeat(160);
        assert_eq!(excerpt(&text, DESCRIPTION_LEN), text);
    }

    #[test]
    fn excerpt_long_text() {
        let text = "б".repeat(500);
        assert_eq!(excerpt(&text, DESCRIPTION_LEN).chars().count(), 160);
    }

    #[test]
    fn excerpt_empty() {
        assert_eq!(excerpt("", 10), "");
    }

    // -- non_empty() tests --

    #[test]
    fn non_empty_filters_empty_strings() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("x")), Some("x"));
    }

    // -- format_date() tests --

    #[test]
    fn format_date_genitive_month() {
        let date = DateTime::from_timestamp(1_709_596_800, 0).unwrap();
        assert_eq!(format_date(&date), "5 березня 2024 р.");
    }

    #[test]
    fn format_date_no_leading_zero() {
        // 2023-01-01 00:00:00 UTC
        let date = DateTime::from_timestamp(1_672_531_200, 0).unwrap();
        assert_eq!(format_date(&date), "1 січня 2023 р.");
    }

    #[test]
    fn format_date_december() {
        // 2023-12-31 23:59:59 UTC
        let date = DateTime::from_timestamp(1_704_067_199, 0).unwrap();
        assert_eq!(format_date(&date), "31 грудня 2023 р.");
    }

    // -- multiline() tests --

    #[test]
    fn multiline_inserts_line_breaks() {
        assert_eq!(multiline("a\nb\nc").into_string(), "a<br>b<br>c");
    }

    #[test]
    fn multiline_escapes_lines() {
        assert_eq!(
            multiline("<b>\n&").into_string(),
            "&lt;b&gt;<br>&amp;"
        );
    }

    #[test]
    fn multiline_single_line() {
        assert_eq!(multiline("one").into_string(), "one");
        assert_eq!(multiline("").into_string(), "");
    }
}
