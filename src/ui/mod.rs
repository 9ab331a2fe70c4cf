//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into a [`Frame`] of ANSI-styled lines
//! through composable rendering components. It provides theme support and
//! responsive layout.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → compose → Frame → print
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (truncation, padding, ANSI stripping)
//! - [`theme`]: Role-keyed color schemes and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::AppState;
//! use zfsguard::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let frame = render(&state, 24, 80);
//! assert!(frame.lines.len() <= 24);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, Frame};
pub use theme::{Role, Theme};
pub use viewmodel::{Body, DisplayItem, EmptyState, HeaderInfo, UIViewModel};
