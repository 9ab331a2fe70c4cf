//! Key model and key bindings.
//!
//! Zellij key events are converted into the plugin's own [`Key`] type at the
//! edge so the state machine never depends on host types. [`Binding`] names the
//! logical actions and owns the default key map; the legend renders straight
//! from it so help text and behaviour cannot drift apart.

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// A key press as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
}

impl Key {
    /// Converts a Zellij key event, returning `None` for keys the plugin ignores.
    ///
    /// Shift is folded into the character (`Shift+d` arrives as `D`), and
    /// `Shift+Tab` becomes [`Key::BackTab`].
    #[must_use]
    pub fn from_zellij(key: &KeyWithModifier) -> Option<Self> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let shift = key.has_modifiers(&[KeyModifier::Shift]);
        let alt = key.has_modifiers(&[KeyModifier::Alt]);

        if alt {
            return None;
        }

        Some(match key.bare_key {
            BareKey::Char(c) if ctrl => Self::Ctrl(c.to_ascii_lowercase()),
            BareKey::Char(c) if shift => Self::Char(c.to_ascii_uppercase()),
            BareKey::Char(c) => Self::Char(c),
            BareKey::Tab if shift => Self::BackTab,
            BareKey::Tab => Self::Tab,
            BareKey::Up => Self::Up,
            BareKey::Down => Self::Down,
            BareKey::PageUp => Self::PageUp,
            BareKey::PageDown => Self::PageDown,
            BareKey::Enter => Self::Enter,
            BareKey::Esc => Self::Esc,
            BareKey::Backspace => Self::Backspace,
            _ => return None,
        })
    }

    /// The character a text field should receive, if this key types one.
    #[must_use]
    pub fn printable(self) -> Option<char> {
        match self {
            Self::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Logical actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Up,
    Down,
    PageUp,
    PageDown,
    Select,
    SelectAll,
    Delete,
    DeleteAll,
    Create,
    Refresh,
    Filter,
    Health,
    Confirm,
    Cancel,
    Help,
    Quit,
}

impl Binding {
    /// Keys that trigger this binding.
    #[must_use]
    pub const fn keys(self) -> &'static [Key] {
        match self {
            Self::Up => &[Key::Char('k'), Key::Up],
            Self::Down => &[Key::Char('j'), Key::Down],
            Self::PageUp => &[Key::PageUp, Key::Ctrl('u')],
            Self::PageDown => &[Key::PageDown, Key::Ctrl('d')],
            Self::Select => &[Key::Char(' '), Key::Char('x')],
            Self::SelectAll => &[Key::Char('a')],
            Self::Delete => &[Key::Char('d')],
            Self::DeleteAll => &[Key::Char('D')],
            Self::Create => &[Key::Char('c')],
            Self::Refresh => &[Key::Char('r')],
            Self::Filter => &[Key::Char('/')],
            Self::Health => &[Key::Char('h')],
            Self::Confirm => &[Key::Char('y')],
            Self::Cancel => &[Key::Char('n'), Key::Esc],
            Self::Help => &[Key::Char('?')],
            Self::Quit => &[Key::Char('q'), Key::Ctrl('c')],
        }
    }

    #[must_use]
    pub fn matches(self, key: Key) -> bool {
        self.keys().contains(&key)
    }

    /// Legend text as `(keys, description)`.
    #[must_use]
    pub const fn help(self) -> (&'static str, &'static str) {
        match self {
            Self::Up => ("k/up", "move up"),
            Self::Down => ("j/down", "move down"),
            Self::PageUp => ("PgUp", "page up"),
            Self::PageDown => ("PgDn", "page down"),
            Self::Select => ("space/x", "toggle select"),
            Self::SelectAll => ("a", "select/deselect all"),
            Self::Delete => ("d", "delete selected"),
            Self::DeleteAll => ("D", "delete ALL snapshots"),
            Self::Create => ("c", "create snapshot"),
            Self::Refresh => ("r", "refresh"),
            Self::Filter => ("/", "filter"),
            Self::Health => ("h", "health report"),
            Self::Confirm => ("y", "confirm"),
            Self::Cancel => ("n/esc", "cancel"),
            Self::Help => ("?", "toggle help"),
            Self::Quit => ("q", "quit"),
        }
    }
}

/// Bindings shown in the one-line legend.
pub const SHORT_HELP: [Binding; 6] = [
    Binding::Help,
    Binding::Select,
    Binding::Delete,
    Binding::Create,
    Binding::Health,
    Binding::Quit,
];

/// Bindings shown in the full help panel, one pair per line.
pub const FULL_HELP: [[Binding; 2]; 8] = [
    [Binding::Up, Binding::Down],
    [Binding::PageUp, Binding::PageDown],
    [Binding::Select, Binding::SelectAll],
    [Binding::Filter, Binding::Refresh],
    [Binding::Create, Binding::Delete],
    [Binding::DeleteAll, Binding::Health],
    [Binding::Confirm, Binding::Cancel],
    [Binding::Help, Binding::Quit],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn zellij_key(bare_key: BareKey, modifiers: &[KeyModifier]) -> KeyWithModifier {
        KeyWithModifier {
            bare_key,
            key_modifiers: modifiers.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn printable_skips_control_characters() {
        assert_eq!(Key::Char('n').printable(), Some('n'));
        assert_eq!(Key::Char('\u{7}').printable(), None);
        assert_eq!(Key::Ctrl('c').printable(), None);
    }

    #[test]
    fn shift_tab_is_back_tab() {
        let key = zellij_key(BareKey::Tab, &[KeyModifier::Shift]);
        assert_eq!(Key::from_zellij(&key), Some(Key::BackTab));
    }

    #[test]
    fn ctrl_letters_are_distinct_from_plain_letters() {
        let key = zellij_key(BareKey::Char('d'), &[KeyModifier::Ctrl]);
        assert_eq!(Key::from_zellij(&key), Some(Key::Ctrl('d')));
        assert!(Binding::PageDown.matches(Key::Ctrl('d')));
        assert!(!Binding::Delete.matches(Key::Ctrl('d')));
    }

    #[test]
    fn shifted_letter_selects_delete_all() {
        let key = zellij_key(BareKey::Char('d'), &[KeyModifier::Shift]);
        let converted = Key::from_zellij(&key).unwrap();
        assert!(Binding::DeleteAll.matches(converted));
    }

    #[test]
    fn full_help_covers_every_binding_once() {
        let listed: Vec<Binding> = FULL_HELP.iter().flatten().copied().collect();
        let unique: std::collections::HashSet<Binding> = listed.iter().copied().collect();
        assert_eq!(listed.len(), 16);
        assert_eq!(unique.len(), 16);
    }
}
