//! Cleanup of generator output before it enters the evaluating pool.

/// Strip bracketed title/style tags the generator echoed back from the prompt.
///
/// Prompts usually open with a header such as `[Title: The Cellar; Style: eerie]`
/// and generators sometimes repeat it verbatim. Every leading `[...]` block is
/// removed along with surrounding whitespace; brackets later in the text are
/// left alone, as is an opening bracket that is never closed.
pub fn strip_echoed_tags(text: &str) -> String {
    let mut rest = text.trim_start();
    while rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => rest = rest[end + 1..].trim_start(),
            None => break,
        }
    }
    rest.trim_end().to_string()
}
