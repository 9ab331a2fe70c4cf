//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a three-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Each component contributes styled lines to the
//!    head, body or trailer of the frame
//! 3. **Fitting**: When the frame is taller than the terminal, body lines are
//!    dropped first so the trailer (and the error banner at its end) survives
//!
//! Rendering is pure; [`Frame::print`] is the only part that writes to stdout.
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::AppState;
//! use zfsguard::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let frame = render(&state, 24, 80);
//! assert!(frame.plain_lines()[0].contains("ZFSGuard"));
//! ```

use crate::app::AppState;
use crate::ui::components::{dialog, empty, filter, footer, header, table};
use crate::ui::helpers::{position_cursor, strip_ansi};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{Body, Line, UIViewModel};

/// A rendered screen: one ANSI-styled string per terminal row, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
}

impl Frame {
    /// Lines with styling removed.
    #[must_use]
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| strip_ansi(l)).collect()
    }

    /// Writes the frame to stdout, one row at a time.
    pub fn print(&self) {
        for (row, line) in self.lines.iter().enumerate() {
            position_cursor(row + 1, 1);
            print!("{line}{}", Theme::reset());
        }
    }
}

/// Renders the plugin UI for a `rows` × `cols` surface.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> Frame {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let vm = state.compute_viewmodel(rows, cols);
    compose(&vm, &state.theme, rows, cols)
}

/// Stacks the component output for `vm` into a frame of at most `rows` lines.
#[must_use]
pub fn compose(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> Frame {
    let mut head = vec![header::title_line(&vm.header, theme, cols)];
    let mut body = Vec::new();
    let mut trailer = Vec::new();

    match &vm.body {
        Body::List(list) => {
            head.push(header::count_line(list.total, list.selected, theme));
            if let Some(bar) = &list.filter_bar {
                head.push(filter::filter_line(bar, theme));
            }
            head.push(table::column_header(list.name_width, theme));
            head.push(table::header_rule(cols, theme));

            match &list.empty_state {
                Some(empty_state) => body.push(empty::empty_line(empty_state, theme)),
                None => body.extend(table::table_rows(&list.display_items, list.name_width, theme)),
            }
            trailer.push(footer::scroll_line(list.scroll.as_ref(), theme));
        }
        Body::Confirm(confirm) => {
            head.push(header::count_line(confirm.total, confirm.selected, theme));
            body.push(String::new());
            body.extend(dialog::boxed(
                &dialog::confirm_content(confirm),
                Role::DialogBorder,
                theme,
                cols,
            ));
        }
        Body::Create(form) => {
            body.push(String::new());
            body.extend(dialog::boxed(
                &dialog::create_content(form),
                Role::CreateBorder,
                theme,
                cols,
            ));
        }
        Body::Health(panel) => {
            body.extend(panel.lines.iter().map(|line| paint_line(line, theme)));
            trailer.push(footer::scroll_line(panel.scroll.as_ref(), theme));
        }
    }

    if let Some(status) = &vm.status {
        trailer.push(footer::status_line(status, theme, cols));
    }
    trailer.extend(footer::legend_lines(vm.legend, theme, cols));
    if let Some(error) = &vm.error {
        trailer.push(footer::error_line(error, theme, cols));
    }

    fit(head, body, trailer, rows)
}

fn paint_line(line: &Line, theme: &Theme) -> String {
    line.spans
        .iter()
        .map(|span| theme.paint(span.role, &span.text))
        .collect()
}

/// Drops body lines (then head lines) until the frame fits in `rows`.
fn fit(head: Vec<String>, mut body: Vec<String>, trailer: Vec<String>, rows: usize) -> Frame {
    let fixed = head.len() + trailer.len();
    body.truncate(rows.saturating_sub(fixed));

    let mut lines = head;
    lines.extend(body);
    lines.extend(trailer);
    if lines.len() > rows {
        lines.drain(..lines.len() - rows);
    }
    Frame { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_the_trailer() {
        let frame = fit(
            vec!["title".into()],
            (0..10).map(|i| format!("row {i}")).collect(),
            vec!["legend".into(), "error".into()],
            5,
        );
        assert_eq!(frame.lines, vec!["title", "row 0", "row 1", "legend", "error"]);
    }

    #[test]
    fn tiny_surface_still_shows_error() {
        let frame = fit(
            vec!["title".into(), "count".into()],
            vec!["row".into()],
            vec!["legend".into(), "error".into()],
            1,
        );
        assert_eq!(frame.lines, vec!["error"]);
    }
}
