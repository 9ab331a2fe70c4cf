//! Dialog component renderer: delete confirmations and the create form.
//!
//! Dialogs are drawn as a rounded box in place of the table rows. Content is
//! assembled as styled [`Line`]s first and clipped to the box's inner width.

use crate::ui::helpers::truncate;
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{ConfirmDialog, CreateForm, Line, Span};

/// Widest a dialog box gets, borders included.
pub const MAX_DIALOG_WIDTH: usize = 72;

/// Cursor glyph drawn after the name being typed.
const INPUT_CURSOR: char = '█';

const CONFIRM_PROMPT: &str = "Press 'y' to confirm, 'n'/Esc to cancel";

/// Splits `names` into the first `limit` entries and the count left over.
///
/// # Examples
///
/// ```
/// use zfsguard::ui::components::dialog::limit_names;
///
/// let names: Vec<String> = (0..12).map(|i| format!("tank@{i}")).collect();
/// let (shown, more) = limit_names(names, 10);
/// assert_eq!((shown.len(), more), (10, 2));
/// ```
#[must_use]
pub fn limit_names(mut names: Vec<String>, limit: usize) -> (Vec<String>, usize) {
    let more = names.len().saturating_sub(limit);
    names.truncate(limit);
    (names, more)
}

/// Content lines of a delete confirmation.
#[must_use]
pub fn confirm_content(dialog: &ConfirmDialog) -> Vec<Line> {
    let mut lines = Vec::new();
    if dialog.all {
        lines.push(Line::styled(
            Role::Unhealthy,
            format!("DELETE ALL {} SNAPSHOTS?", dialog.count),
        ));
        lines.push(Line::blank());
        lines.push(Line::styled(
            Role::Normal,
            "This will destroy every snapshot on the system.",
        ));
        lines.push(Line::styled(
            Role::Unhealthy,
            "This action is IRREVERSIBLE and requires elevated privileges.",
        ));
    } else {
        lines.push(Line::styled(
            Role::DialogBorder,
            format!("Delete {} selected snapshot(s)?", dialog.count),
        ));
        lines.push(Line::blank());
        for name in &dialog.names {
            lines.push(Line::styled(Role::Normal, format!("  - {name}")));
        }
        if dialog.more > 0 {
            lines.push(Line::styled(Role::Dim, format!("  ... and {} more", dialog.more)));
        }
        lines.push(Line::blank());
        lines.push(Line::styled(
            Role::Dim,
            "This action requires elevated privileges.",
        ));
    }
    lines.push(Line::blank());
    lines.push(Line::styled(Role::Label, CONFIRM_PROMPT));
    lines
}

/// Content lines of the create form.
#[must_use]
pub fn create_content(form: &CreateForm) -> Vec<Line> {
    let mut lines = vec![
        Line::styled(Role::CreateBorder, "Create New Snapshot"),
        Line::blank(),
    ];

    let Some(dataset) = &form.dataset else {
        lines.push(Line::styled(Role::Unhealthy, "No datasets found."));
        lines.push(Line::styled(Role::Dim, "Press Esc to go back."));
        return lines;
    };

    lines.push(Line::styled(Role::Label, "Dataset (Tab/Shift+Tab to cycle):"));
    lines.push(Line::styled(Role::Dataset, format!("  {dataset}")));
    lines.push(Line::blank());
    lines.push(Line::styled(Role::Label, "Snapshot name:"));
    lines.push(
        Line::styled(Role::Value, format!("  {}", form.name)).push(Role::Filter, INPUT_CURSOR),
    );
    lines.push(Line::blank());
    lines.push(
        Line::styled(Role::Dim, "Will create: ")
            .push(Role::Dataset, dataset.clone())
            .push(Role::SnapshotName, format!("@{}", form.name.trim())),
    );
    lines.push(Line::blank());
    lines.push(Line::styled(Role::Dim, "Enter to confirm | Esc to cancel"));
    lines
}

/// Draws `content` inside a rounded box whose frame uses `border`.
#[must_use]
pub fn boxed(content: &[Line], border: Role, theme: &Theme, cols: usize) -> Vec<String> {
    let width = cols.saturating_sub(4).min(MAX_DIALOG_WIDTH).max(8);
    let inner = width - 4;
    let horizontal = "─".repeat(width - 2);

    let mut out = Vec::with_capacity(content.len() + 2);
    out.push(format!("  {}", theme.paint(border, &format!("╭{horizontal}╮"))));
    for line in content {
        let (spans, len) = clip(line, inner);
        let body: String = spans
            .iter()
            .map(|span| theme.paint(span.role, &span.text))
            .collect();
        out.push(format!(
            "  {} {body}{} {}",
            theme.paint(border, "│"),
            " ".repeat(inner - len),
            theme.paint(border, "│")
        ));
    }
    out.push(format!("  {}", theme.paint(border, &format!("╰{horizontal}╯"))));
    out
}

/// Clips a line to `width` characters, returning the kept spans and their length.
fn clip(line: &Line, width: usize) -> (Vec<Span>, usize) {
    let total = line.text().chars().count();
    if total <= width {
        return (line.spans.clone(), total);
    }

    let plain = truncate(&line.text(), width);
    let mut remaining = plain.chars().count();
    let mut taken = 0;
    let mut spans = Vec::new();
    for span in &line.spans {
        if remaining == 0 {
            break;
        }
        let text: String = plain.chars().skip(taken).take(span.text.chars().count().min(remaining)).collect();
        let len = text.chars().count();
        taken += len;
        remaining -= len;
        spans.push(Span {
            text,
            role: span.role,
        });
    }
    (spans, taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn confirm_lists_targets_then_overflow() {
        let dialog = ConfirmDialog {
            all: false,
            count: 12,
            total: 40,
            selected: 12,
            names: (0..10).map(|i| format!("tank@{i}")).collect(),
            more: 2,
        };
        let text: Vec<String> = confirm_content(&dialog).iter().map(Line::text).collect();
        assert_eq!(text[0], "Delete 12 selected snapshot(s)?");
        assert!(text.contains(&"  - tank@9".to_string()));
        assert!(text.contains(&"  ... and 2 more".to_string()));
        assert_eq!(text.last().map(String::as_str), Some(CONFIRM_PROMPT));
    }

    #[test]
    fn delete_all_warns() {
        let dialog = ConfirmDialog {
            all: true,
            count: 3,
            total: 3,
            selected: 0,
            names: vec![],
            more: 0,
        };
        let text: Vec<String> = confirm_content(&dialog).iter().map(Line::text).collect();
        assert_eq!(text[0], "DELETE ALL 3 SNAPSHOTS?");
        assert!(text.iter().any(|l| l.contains("IRREVERSIBLE")));
    }

    #[test]
    fn create_without_datasets_offers_way_back() {
        let form = CreateForm {
            dataset: None,
            name: "x".into(),
        };
        let text: Vec<String> = create_content(&form).iter().map(Line::text).collect();
        assert_eq!(text, vec!["Create New Snapshot", "", "No datasets found.", "Press Esc to go back."]);
    }

    #[test]
    fn create_previews_identity() {
        let form = CreateForm {
            dataset: Some("tank/home".into()),
            name: " daily ".into(),
        };
        let text: Vec<String> = create_content(&form).iter().map(Line::text).collect();
        assert!(text.contains(&"Will create: tank/home@daily".to_string()));
    }

    #[test]
    fn boxed_lines_share_one_width() {
        let content = vec![
            Line::styled(Role::Normal, "short"),
            Line::styled(Role::Normal, "x".repeat(200)),
        ];
        let lines: Vec<usize> = boxed(&content, Role::DialogBorder, &Theme::default(), 60)
            .iter()
            .map(|l| strip_ansi(l).chars().count())
            .collect();
        assert!(lines.iter().all(|&w| w == lines[0]));
        assert_eq!(lines[0], 58);
    }
}
