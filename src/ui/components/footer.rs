//! Footer component renderer.
//!
//! Everything below the body: the scroll indicator, the status line, the key
//! binding legend and the persistent error banner.

use crate::app::keys::{Binding, FULL_HELP, SHORT_HELP};
use crate::ui::helpers::{pad, truncate};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{Legend, ScrollInfo, StatusLine};

const LEGEND_SEPARATOR: &str = " • ";
const KEY_WIDTH: usize = 9;
const DESCRIPTION_WIDTH: usize = 24;

/// Renders ` [first-last of total] pct%`, or ` [lines first-last of total] pct%`
/// for the health view. Empty when there is nothing to scroll.
///
/// # Example
///
/// ```rust
/// use zfsguard::ui::components::footer::scroll_line;
/// use zfsguard::ui::viewmodel::ScrollInfo;
/// use zfsguard::ui::Theme;
///
/// let info = ScrollInfo { first: 1, last: 18, total: 40, percent: 0, lines: false };
/// assert!(scroll_line(Some(&info), &Theme::plain()).contains("[1-18 of 40] 0%"));
/// assert_eq!(scroll_line(None, &Theme::plain()), "");
/// ```
#[must_use]
pub fn scroll_line(scroll: Option<&ScrollInfo>, theme: &Theme) -> String {
    let Some(info) = scroll else {
        return String::new();
    };
    let unit = if info.lines { "lines " } else { "" };
    theme.paint(
        Role::Count,
        &format!(
            " [{unit}{}-{} of {}] {}%",
            info.first, info.last, info.total, info.percent
        ),
    )
}

/// Renders the transient status message.
#[must_use]
pub fn status_line(status: &StatusLine, theme: &Theme, cols: usize) -> String {
    let role = if status.is_error {
        Role::Error
    } else {
        Role::Status
    };
    theme.paint(role, &truncate(&format!(" {}", status.text), cols))
}

/// Renders the persistent error banner.
#[must_use]
pub fn error_line(error: &str, theme: &Theme, cols: usize) -> String {
    theme.paint(Role::Error, &truncate(&format!(" {error}"), cols))
}

/// Renders the one-line legend or the full help panel.
#[must_use]
pub fn legend_lines(legend: Legend, theme: &Theme, cols: usize) -> Vec<String> {
    if !legend.full {
        let text = SHORT_HELP
            .iter()
            .map(|binding| entry(*binding))
            .collect::<Vec<_>>()
            .join(LEGEND_SEPARATOR);
        return vec![theme.paint(Role::Dim, &truncate(&format!(" {text}"), cols))];
    }

    let mut lines = vec![theme.paint(Role::Header, " Key bindings")];
    lines.extend(FULL_HELP.iter().map(|[left, right]| {
        let (left_keys, left_desc) = left.help();
        let (right_keys, right_desc) = right.help();
        format!(
            "  {}{}{}{}",
            theme.paint(Role::Label, &pad(left_keys, KEY_WIDTH)),
            theme.paint(Role::Dim, &pad(left_desc, DESCRIPTION_WIDTH)),
            theme.paint(Role::Label, &pad(right_keys, KEY_WIDTH)),
            theme.paint(Role::Dim, right_desc),
        )
    }));
    lines
}

fn entry(binding: Binding) -> String {
    let (keys, description) = binding.help();
    format!("{keys} {description}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::viewport::HELP_PANEL_LINES;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn full_help_fills_its_reserved_lines() {
        let lines = legend_lines(Legend { full: true }, &Theme::default(), 80);
        assert_eq!(lines.len(), HELP_PANEL_LINES + 1);
        assert!(strip_ansi(&lines[1]).contains("move up"));
    }

    #[test]
    fn short_legend_is_one_line() {
        let lines = legend_lines(Legend { full: false }, &Theme::default(), 200);
        assert_eq!(lines.len(), 1);
        assert!(strip_ansi(&lines[0]).starts_with(" ? toggle help • space/x toggle select"));
    }

    #[test]
    fn health_scroll_mentions_lines() {
        let info = ScrollInfo {
            first: 11,
            last: 20,
            total: 30,
            percent: 50,
            lines: true,
        };
        assert_eq!(
            strip_ansi(&scroll_line(Some(&info), &Theme::default())),
            " [lines 11-20 of 30] 50%"
        );
    }
}
