//! Text helpers for building markup from untrusted strings.
//!
//! Everything the backend or the user supplies goes through
//! [`escape_html`] before it is placed inside markup.

/// Marker appended to truncated snippets.
pub const ELLIPSIS: char = '…';

/// Escapes `& < > " '` so the text renders literally inside markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_html`] for the five entities it produces.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Plain text of a markup fragment: tags dropped, entities decoded.
///
/// Only understands the markup this crate produces; it is not an HTML parser.
pub fn markup_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    unescape_html(&out)
}

/// First `max_chars` characters of `text`, with [`ELLIPSIS`] appended when
/// anything was cut. Counts Unicode scalar values, not bytes.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = text[..byte_idx].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Relevance score with exactly three decimals.
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}
