//! Log-friendly previews of generated text.

/// Single-line preview of `text`, at most `max_chars` characters.
///
/// Runs of whitespace (including newlines) collapse to one space. When the
/// text is cut, the last three characters of the budget become `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }

    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str("...");
    out
}
