//! Greedy word wrapping for commit message bodies.

/// Wraps `text` at `width` columns using a first-fit greedy strategy.
///
/// Tokens are split on whitespace and re-joined with single spaces, so the
/// result is stable under repeated folding at the same width. A single
/// token longer than `width` is emitted unbroken on its own line; callers
/// should treat `width` as a target rather than a hard ceiling for such
/// inputs (URLs, long identifiers).
pub fn fold(text: &str, width: usize) -> String {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut wrapped = String::from(first);
    let mut line_len = first.len();
    for word in words {
        if line_len + 1 + word.len() > width {
            wrapped.push('\n');
            line_len = word.len();
        } else {
            wrapped.push(' ');
            line_len += 1 + word.len();
        }
        wrapped.push_str(word);
    }
    wrapped
}

/// Wraps `text` at `width`, keeping `"- "` bullet items intact.
///
/// The text is split on the bullet delimiter first and each item is folded
/// independently, so a bullet marker is never separated from its item by a
/// wrap boundary. Text without bullets behaves exactly like [`fold`].
pub fn fold_bulleted(text: &str, width: usize) -> String {
    let mut parts = text.split("- ");
    let head = fold(parts.next().unwrap_or_default(), width);

    let mut out = head;
    for part in parts {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("- ");
        out.push_str(&fold(part, width));
    }
    out
}
