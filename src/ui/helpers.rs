//! Shared rendering utilities and helpers.
//!
//! Width arithmetic here counts `char`s, not bytes, so dataset names with
//! non-ASCII characters are padded and truncated correctly.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
///
/// # Examples
///
/// ```
/// use zfsguard::ui::helpers::truncate;
///
/// assert_eq!(truncate("tank@daily", 20), "tank@daily");
/// assert_eq!(truncate("tank/home@weekly-2025", 12), "tank/home...");
/// assert_eq!(truncate("tank", 2), "ta");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Left-aligns `text` in a field of `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Removes ANSI CSI escape sequences, leaving the visible text.
///
/// # Examples
///
/// ```
/// use zfsguard::ui::helpers::strip_ansi;
///
/// assert_eq!(strip_ansi("\u{1b}[1m\u{1b}[38;2;0;191;255mtank\u{1b}[0m"), "tank");
/// ```
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        if chars.next() != Some('[') {
            continue;
        }
        for terminator in chars.by_ref() {
            if terminator.is_ascii_alphabetic() {
                break;
            }
        }
    }
    out
}

/// Horizontal rule of `width` box-drawing characters.
#[must_use]
pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("pööl@snäp-long-name", 10), "pööl@sn...");
        assert_eq!(truncate("pööl@snäp-long-name", 10).chars().count(), 10);
    }

    #[test]
    fn pad_never_shortens() {
        assert_eq!(pad("Used", 6), "Used  ");
        assert_eq!(pad("too long", 3), "too long");
    }
}
