//! Text helpers: safe truncation and mrkdwn escaping
//!
//! The platform measures field lengths in UTF-16 code units, so truncation
//! counts code units while cutting only at full character boundaries; an
//! emoji that occupies a surrogate pair is either kept whole or dropped.

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Truncate `text` to at most `max_units` UTF-16 code units.
///
/// Never splits a character: a character whose width would cross the limit
/// is dropped entirely.
pub fn truncate(text: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        let width = ch.len_utf16();
        if units + width > max_units {
            return &text[..idx];
        }
        units += width;
    }
    text
}

/// Escape the three characters the platform's mrkdwn syntax reserves.
///
/// Exactly `&`, `<` and `>` are escaped; quote characters stay literal. An
/// ampersand that already starts one of the three entities is left alone,
/// so escaping is idempotent over the engine's own output.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' => {
                let rest = &text[idx + 1..];
                if rest.starts_with("amp;") || rest.starts_with("lt;") || rest.starts_with("gt;") {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
