//! Filter bar component renderer.

use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::FilterBar;

/// Cursor glyph drawn after the query while the bar has focus.
const INPUT_CURSOR: char = '█';

/// Renders `Filter: <query> (matched/total matched)`.
///
/// While editing, a block cursor follows the query.
#[must_use]
pub fn filter_line(bar: &FilterBar, theme: &Theme) -> String {
    let query = if bar.editing {
        format!(" Filter: {}{INPUT_CURSOR}", bar.query)
    } else {
        format!(" Filter: {}", bar.query)
    };
    format!(
        "{} {}",
        theme.paint(Role::Filter, &query),
        theme.paint(Role::Count, &format!("({}/{} matched)", bar.matched, bar.total))
    )
}
