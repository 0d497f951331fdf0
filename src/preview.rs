pub const DEFAULT_PREVIEW_CHARS: usize = 2000;

/// Returns at most `limit` characters from the start of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
