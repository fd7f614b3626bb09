//! Splitting long texts into platform-sized segments.

/// Raw cut of `text` into pieces of at most `max_len` characters. A piece ends after the last
/// newline within the cap, or at the cap when there is none. Pieces concatenate to `text`.
pub(crate) fn split_raw(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut pieces = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = match rest.char_indices().nth(max_len) {
            None => rest.len(),
            Some((limit, _)) => rest[..limit].rfind('\n').map_or(limit, |i| i + 1),
        };
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces
}

/// Splits `text` into trimmed segments of at most `max_len` characters, dropping segments
/// that are empty after trimming.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    split_raw(text, max_len)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
