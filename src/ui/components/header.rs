//! Header component renderer.
//!
//! Renders the title bar and the record count line beneath it.

use crate::ui::helpers::truncate;
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered across the full terminal width.
///
/// The padding is painted too, so the title background spans the whole line.
///
/// # Example
///
/// ```rust
/// use zfsguard::ui::components::header::title_line;
/// use zfsguard::ui::helpers::strip_ansi;
/// use zfsguard::ui::viewmodel::HeaderInfo;
/// use zfsguard::ui::Theme;
///
/// let header = HeaderInfo { title: " ZFSGuard ".to_string() };
/// assert_eq!(strip_ansi(&title_line(&header, &Theme::plain(), 20)), "      ZFSGuard      ");
/// ```
#[must_use]
pub fn title_line(header: &HeaderInfo, theme: &Theme, cols: usize) -> String {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    let line = format!(
        "{}{title}{}",
        " ".repeat(padding),
        " ".repeat(cols.saturating_sub(padding + title_len))
    );
    theme.paint(Role::Title, &line)
}

/// Renders ` N snapshots | M selected`.
#[must_use]
pub fn count_line(total: usize, selected: usize, theme: &Theme) -> String {
    theme.paint(
        Role::Count,
        &format!(" {total} snapshots | {selected} selected"),
    )
}
