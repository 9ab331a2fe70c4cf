//! Viewport arithmetic for the snapshot list and the health report.
//!
//! The list view keeps a cursor and scrolls to follow it; the health view has no
//! cursor and clamps its scroll offset directly.

/// Lines taken by the title, count line, column header, rule, scroll indicator
/// and legend.
pub const CHROME_LINES: usize = 6;

/// Extra lines taken by the full key-binding legend.
pub const HELP_PANEL_LINES: usize = 8;

/// Data rows never shrink below this.
pub const MIN_VIEWPORT_HEIGHT: usize = 3;

/// Number of data rows available for the list or the health report.
///
/// # Examples
///
/// ```
/// use zfsguard::app::viewport::viewport_height;
///
/// assert_eq!(viewport_height(24, false, false, false), 18);
/// assert_eq!(viewport_height(24, true, false, false), 10);
/// assert_eq!(viewport_height(10, true, true, true), 3);
/// ```
#[must_use]
pub const fn viewport_height(
    terminal_height: usize,
    help_visible: bool,
    status_visible: bool,
    filter_bar_visible: bool,
) -> usize {
    let mut reserved = CHROME_LINES;
    if help_visible {
        reserved += HELP_PANEL_LINES;
    }
    if status_visible {
        reserved += 1;
    }
    if filter_bar_visible {
        reserved += 1;
    }

    let height = terminal_height.saturating_sub(reserved);
    if height < MIN_VIEWPORT_HEIGHT {
        MIN_VIEWPORT_HEIGHT
    } else {
        height
    }
}

/// Scroll-follow: returns the offset that keeps `cursor` inside
/// `[offset, offset + height)`, moving as little as possible.
///
/// # Examples
///
/// ```
/// use zfsguard::app::viewport::ensure_visible;
///
/// assert_eq!(ensure_visible(2, 5, 10), 2);
/// assert_eq!(ensure_visible(20, 0, 10), 11);
/// assert_eq!(ensure_visible(7, 3, 10), 3);
/// ```
#[must_use]
pub const fn ensure_visible(cursor: usize, offset: usize, height: usize) -> usize {
    let height = if height == 0 { 1 } else { height };
    if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}

/// Clamps a line scroll offset to `[0, max(0, total - height)]`.
#[must_use]
pub const fn clamp_scroll(scroll: usize, total: usize, height: usize) -> usize {
    let max = total.saturating_sub(height);
    if scroll > max {
        max
    } else {
        scroll
    }
}

/// Clamps a cursor into `[0, count)`, or to zero when `count` is zero.
#[must_use]
pub const fn clamp_cursor(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else if cursor >= count {
        count - 1
    } else {
        cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_panel_reduces_height_by_its_reserved_lines() {
        let plain = viewport_height(24, false, false, false);
        let with_help = viewport_height(24, true, false, false);
        assert_eq!(plain - with_help, HELP_PANEL_LINES);
    }

    #[test]
    fn status_and_filter_bar_take_one_line_each() {
        assert_eq!(viewport_height(24, false, true, false), 17);
        assert_eq!(viewport_height(24, false, true, true), 16);
    }

    #[test]
    fn tiny_terminals_floor_at_minimum() {
        assert_eq!(viewport_height(0, false, false, false), MIN_VIEWPORT_HEIGHT);
        assert_eq!(viewport_height(8, false, false, false), MIN_VIEWPORT_HEIGHT);
    }

    #[test]
    fn clamp_scroll_handles_short_content() {
        assert_eq!(clamp_scroll(5, 3, 10), 0);
        assert_eq!(clamp_scroll(50, 30, 10), 20);
        assert_eq!(clamp_scroll(4, 30, 10), 4);
    }

    #[test]
    fn cursor_clamps_into_range() {
        assert_eq!(clamp_cursor(9, 0), 0);
        assert_eq!(clamp_cursor(9, 4), 3);
        assert_eq!(clamp_cursor(2, 4), 2);
    }
}
