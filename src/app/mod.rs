//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/provider/worker layers. It implements
//! the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key / Timer → Events → Event Handler → State Mutations → Actions → Dispatcher
//!                            ↑                                          ↓
//!                            └──── Command results / Worker Responses ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`keys`]: Key decoding and the default binding table
//! - [`modes`]: Screen state machine type
//! - [`records`]: Record store, selection and filter projection
//! - [`state`]: Central application state container and view model computation
//! - [`text_input`]: Single-line input buffer
//! - [`viewport`]: Viewport height and scroll-follow arithmetic
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::{handle_event, AppState, Event, Key};
//! use zfsguard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Key(Key::Char('?')))?;
//! assert!(render && actions.is_empty());
//! assert!(state.show_help);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod records;
pub mod state;
pub mod text_input;
pub mod viewport;

pub use actions::{Action, Command};
pub use handler::{handle_event, Event};
pub use keys::{Binding, Key};
pub use modes::Screen;
pub use records::{Filter, RecordStore};
pub use state::{AppState, HealthState, StatusMessage};
pub use text_input::TextInput;
