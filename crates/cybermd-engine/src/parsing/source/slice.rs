use super::span::Span;

/// Extracts the text for a span, clamped to the source bounds.
///
/// Offsets that land inside a multi-byte character yield an empty slice
/// rather than panicking.
pub fn slice(text: &str, sp: Span) -> &str {
    let end = sp.end.min(text.len());
    let start = sp.start.min(end);
    text.get(start..end).unwrap_or("")
}

/// Extracts text for a span, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for human-readable snapshot output.
pub fn preview(text: &str, sp: Span, max: usize) -> String {
    let mut s = slice(text, sp).to_string();
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
