//! Table component renderer.
//!
//! This module renders the snapshot list as a five-column table: selection
//! mark, name, used, refer and creation time. The name column takes whatever
//! width the fixed columns leave.
//!
//! # Layout
//!
//! ```text
//!   Sel   Name                              Used       Refer      Created
//!   [x]   tank/home@daily                   1.2M       40G        2025-02-27 10:30
//! ```

use crate::ui::helpers::{pad, rule};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::DisplayItem;

/// The header rule never grows past this width.
pub const MAX_RULE_WIDTH: usize = 90;

const MARK_WIDTH: usize = 5;
const SIZE_WIDTH: usize = 10;

/// Renders the column headers.
#[must_use]
pub fn column_header(name_width: usize, theme: &Theme) -> String {
    let text = format!(
        "  {} {} {} {} Created",
        pad("Sel", MARK_WIDTH),
        pad("Name", name_width),
        pad("Used", SIZE_WIDTH),
        pad("Refer", SIZE_WIDTH),
    );
    theme.paint(Role::Header, &text)
}

/// Renders the rule under the column headers.
#[must_use]
pub fn header_rule(cols: usize, theme: &Theme) -> String {
    theme.paint(Role::Header, &rule(cols.min(MAX_RULE_WIDTH)))
}

/// Renders all rows of the current window.
#[must_use]
pub fn table_rows(items: &[DisplayItem], name_width: usize, theme: &Theme) -> Vec<String> {
    items
        .iter()
        .map(|item| table_row(item, name_width, theme))
        .collect()
}

/// Renders a single row.
///
/// # Styling Precedence
///
/// 1. Cursor: whole row in the cursor style
/// 2. Selected: lit check mark, whole row in the selected color
/// 3. Normal: dataset and snapshot halves of the name colored separately
fn table_row(item: &DisplayItem, name_width: usize, theme: &Theme) -> String {
    let mark = if item.is_selected { "[x]" } else { "[ ]" };
    let columns = format!(
        " {} {} {}",
        pad(&item.used, SIZE_WIDTH),
        pad(&item.refer, SIZE_WIDTH),
        item.created
    );

    if item.is_cursor {
        let text = format!(
            "  {} {}{columns}",
            pad(mark, MARK_WIDTH),
            pad(&item.name, name_width)
        );
        return theme.paint(Role::Cursor, &text);
    }

    let mark_role = if item.is_selected {
        Role::CheckOn
    } else {
        Role::CheckOff
    };
    let gap = " ".repeat(MARK_WIDTH - mark.len() + 1);
    let name_padding = " ".repeat(name_width.saturating_sub(item.name.chars().count()));

    if item.is_selected {
        return format!(
            "  {}{gap}{}",
            theme.paint(mark_role, mark),
            theme.paint(Role::Selected, &format!("{}{name_padding}{columns}", item.name))
        );
    }

    format!(
        "  {}{gap}{}{}{name_padding}{}",
        theme.paint(mark_role, mark),
        theme.paint(Role::Dataset, &item.dataset_part),
        theme.paint(Role::SnapshotName, &item.snapshot_part),
        theme.paint(Role::Normal, &columns)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Snapshot;
    use crate::ui::helpers::strip_ansi;

    fn item(selected: bool, cursor: bool) -> DisplayItem {
        let mut snap = Snapshot::new("tank@a", "1K", "2K", None);
        snap.selected = selected;
        DisplayItem::from_snapshot(&snap, 20, cursor)
    }

    #[test]
    fn row_text_is_identical_across_styles() {
        let theme = Theme::default();
        let plain = strip_ansi(&table_row(&item(false, false), 20, &theme));
        let cursor = strip_ansi(&table_row(&item(false, true), 20, &theme));
        assert_eq!(plain, cursor);
        assert!(plain.starts_with("  [ ]   tank@a"));
    }

    #[test]
    fn header_aligns_with_rows() {
        let theme = Theme::default();
        let header = strip_ansi(&column_header(20, &theme));
        let row = strip_ansi(&table_row(&item(true, false), 20, &theme));
        assert_eq!(header.find("Used"), row.find("1K"));
        assert!(row.starts_with("  [x]"));
    }

    #[test]
    fn rule_is_capped() {
        let rule = strip_ansi(&header_rule(200, &Theme::default()));
        assert_eq!(rule.chars().count(), MAX_RULE_WIDTH);
    }
}
