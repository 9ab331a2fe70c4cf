//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting both
//! built-in themes and custom themes loaded from TOML files. Rendering code
//! never names a color directly: it asks for a [`Role`] and the theme decides
//! how that role is painted.
//!
//! # Built-in Themes
//!
//! - `zfsguard-dark`: High-contrast dark theme (default)
//! - `zfsguard-light`: Variant for light terminal backgrounds
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! title_fg = "#00BFFF"
//! title_bg = "#1a1a2e"
//! header_fg = "#888888"
//! cursor_fg = "#FFFFFF"
//! cursor_bg = "#333355"
//! selected_fg = "#00FF88"
//! text_normal = "#CCCCCC"
//! text_dim = "#666666"
//! check_on = "#00FF88"
//! check_off = "#555555"
//! status_fg = "#00FF88"
//! error_fg = "#FF4444"
//! dialog_border = "#FF8800"
//! create_border = "#00BFFF"
//! filter_fg = "#FFAA00"
//! count_fg = "#888888"
//! dataset_fg = "#00BFFF"
//! snapshot_fg = "#FFFFFF"
//! health_title_fg = "#00BFFF"
//! healthy_fg = "#00FF88"
//! unhealthy_fg = "#FF4444"
//! label_fg = "#AAAAAA"
//! value_fg = "#CCCCCC"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zfsguard::ui::theme::{Role, Theme};
//!
//! let theme = Theme::from_name("zfsguard-dark").unwrap();
//! let painted = theme.paint(Role::Error, "boom");
//! assert!(painted.starts_with('\u{1b}'));
//! assert_eq!(Theme::plain().paint(Role::Error, "boom"), "boom");
//! ```

use crate::domain::error::{Result, ZfsGuardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "zfsguard-dark";

/// What a piece of text means, independent of how it is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    /// Column headers and rules.
    Header,
    /// Row under the cursor.
    Cursor,
    /// Selected row not under the cursor.
    Selected,
    Normal,
    CheckOn,
    CheckOff,
    Status,
    Error,
    /// Confirm dialog frame and heading.
    DialogBorder,
    /// Create dialog frame and heading.
    CreateBorder,
    Filter,
    Count,
    Dataset,
    SnapshotName,
    HealthTitle,
    Healthy,
    Unhealthy,
    Label,
    Value,
    Dim,
}

/// Color scheme configuration for UI rendering.
///
/// Contains theme metadata and color definitions. Can be loaded from built-in
/// themes or custom TOML files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#00BFFF"). An empty string
/// leaves the terminal default in place.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThemeColors {
    pub title_fg: String,
    #[serde(default)]
    pub title_bg: Option<String>,
    pub header_fg: String,
    pub cursor_fg: String,
    pub cursor_bg: String,
    pub selected_fg: String,
    pub text_normal: String,
    pub text_dim: String,
    pub check_on: String,
    pub check_off: String,
    pub status_fg: String,
    pub error_fg: String,
    pub dialog_border: String,
    pub create_border: String,
    pub filter_fg: String,
    pub count_fg: String,
    pub dataset_fg: String,
    pub snapshot_fg: String,
    pub health_title_fg: String,
    pub healthy_fg: String,
    pub unhealthy_fg: String,
    pub label_fg: String,
    pub value_fg: String,
}

/// Resolved paint instructions for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Style<'a> {
    fg: &'a str,
    bg: Option<&'a str>,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl<'a> Style<'a> {
    const fn fg(fg: &'a str) -> Self {
        Self {
            fg,
            bg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Escape sequences for this style; empty when neither color resolves,
    /// so a colorless palette also drops the text attributes.
    fn prefix(&self) -> String {
        let fg = Theme::fg(self.fg);
        let bg = self.bg.map(Theme::bg).unwrap_or_default();
        if fg.is_empty() && bg.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        if self.bold {
            out.push_str(Theme::bold());
        }
        if self.italic {
            out.push_str(Theme::italic());
        }
        if self.underline {
            out.push_str(Theme::underline());
        }
        out.push_str(&fg);
        out.push_str(&bg);
        out
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `zfsguard-dark`, `zfsguard-light`.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "zfsguard-dark" => include_str!("../../themes/zfsguard-dark.toml"),
            "zfsguard-light" => include_str!("../../themes/zfsguard-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZfsGuardError::Theme`] if the file cannot be read or the TOML
    /// content cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ZfsGuardError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ZfsGuardError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// A theme that emits no escape sequences at all.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: ThemeColors::default(),
        }
    }

    fn style(&self, role: Role) -> Style<'_> {
        let c = &self.colors;
        match role {
            Role::Title => Style {
                bg: c.title_bg.as_deref(),
                bold: true,
                ..Style::fg(&c.title_fg)
            },
            Role::Header => Style {
                bold: true,
                ..Style::fg(&c.header_fg)
            },
            Role::Cursor => Style {
                bg: Some(&c.cursor_bg),
                bold: true,
                ..Style::fg(&c.cursor_fg)
            },
            Role::Selected => Style::fg(&c.selected_fg),
            Role::Normal => Style::fg(&c.text_normal),
            Role::CheckOn => Style {
                bold: true,
                ..Style::fg(&c.check_on)
            },
            Role::CheckOff => Style::fg(&c.check_off),
            Role::Status => Style::fg(&c.status_fg),
            Role::Error => Style {
                bold: true,
                ..Style::fg(&c.error_fg)
            },
            Role::DialogBorder => Style {
                bold: true,
                ..Style::fg(&c.dialog_border)
            },
            Role::CreateBorder => Style {
                bold: true,
                ..Style::fg(&c.create_border)
            },
            Role::Filter => Style::fg(&c.filter_fg),
            Role::Count => Style {
                italic: true,
                ..Style::fg(&c.count_fg)
            },
            Role::Dataset => Style::fg(&c.dataset_fg),
            Role::SnapshotName => Style::fg(&c.snapshot_fg),
            Role::HealthTitle => Style {
                bold: true,
                underline: true,
                ..Style::fg(&c.health_title_fg)
            },
            Role::Healthy => Style {
                bold: true,
                ..Style::fg(&c.healthy_fg)
            },
            Role::Unhealthy => Style {
                bold: true,
                ..Style::fg(&c.unhealthy_fg)
            },
            Role::Label => Style::fg(&c.label_fg),
            Role::Value => Style::fg(&c.value_fg),
            Role::Dim => Style::fg(&c.text_dim),
        }
    }

    /// Wraps `text` in the escape sequences for `role`.
    ///
    /// Text is returned untouched when the role resolves to no styling.
    #[must_use]
    pub fn paint(&self, role: Role, text: &str) -> String {
        let prefix = self.style(role).prefix();
        if prefix.is_empty() {
            return text.to_string();
        }
        format!("{prefix}{text}{}", Self::reset())
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `None` for empty or malformed values.
    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some((r, g, b))
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// Returns an empty string when `hex` is not a valid color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zfsguard::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#00BFFF"), "\u{1b}[38;2;0;191;255m");
    /// assert_eq!(Theme::fg(""), "");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| {
            format!("\u{001b}[38;2;{r};{g};{b}m")
        })
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    ///
    /// Returns an empty string when `hex` is not a valid color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| {
            format!("\u{001b}[48;2;{r};{g};{b}m")
        })
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI italic escape sequence (`\x1b[3m`).
    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    /// Returns the ANSI underline escape sequence (`\x1b[4m`).
    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, italic, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`zfsguard-dark`), or [`Theme::plain`] if the
    /// built-in palette cannot be parsed.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!(theme = DEFAULT_THEME, "built-in theme failed to parse");
            Self::plain()
        })
    }
}
