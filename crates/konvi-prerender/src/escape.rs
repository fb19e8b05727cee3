//! HTML escaping for text that is inserted into documents.
//!
//! maud escapes the same four characters for every `(value)` it
//! interpolates, so template code never calls these directly. They cover the
//! raw-text contexts maud leaves alone, such as the inline redirect script.

/// Escape `&`, `<`, `>` and `"` as HTML entities.
///
/// `&` is replaced first so the entities produced for the other characters
/// are not escaped a second time.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
