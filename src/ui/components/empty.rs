//! Empty state component renderer.
//!
//! Rendered in place of table rows when the visible projection is empty:
//! while the first load is running, when there are no snapshots at all, and
//! when the filter matches nothing.

use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message, indented like a table row.
///
/// # Example
///
/// ```rust
/// use zfsguard::ui::components::empty::empty_line;
/// use zfsguard::ui::viewmodel::EmptyState;
/// use zfsguard::ui::Theme;
///
/// let empty = EmptyState { message: "No snapshots match the filter.".to_string() };
/// assert!(empty_line(&empty, &Theme::plain()).ends_with("  No snapshots match the filter."));
/// ```
#[must_use]
pub fn empty_line(empty: &EmptyState, theme: &Theme) -> String {
    theme.paint(Role::Dim, &format!("  {}", empty.message))
}
