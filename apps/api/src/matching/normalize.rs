//! Text normalization shared by every matcher.

/// Lowercases `text` and collapses every run of whitespace into a single space.
///
/// Leading and trailing whitespace is collapsed, not trimmed: `"  Rust "` becomes `" rust "`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        out.extend(ch.to_lowercase());
    }

    out
}
