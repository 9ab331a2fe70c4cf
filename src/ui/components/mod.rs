//! Composable UI component renderers.
//!
//! Each component turns one part of the view model into styled lines; none of
//! them print. The renderer stacks their output into a [`Frame`](crate::ui::Frame).
//!
//! # Components
//!
//! - [`header`]: Title bar and record count line
//! - [`filter`]: Filter bar with match count
//! - [`table`]: Column headers and snapshot rows
//! - [`empty`]: Empty state message for no rows
//! - [`dialog`]: Delete confirmations and the create form
//! - [`health`]: Pool and disk health report
//! - [`footer`]: Scroll indicator, status line, legend and error banner
//!
//! # Layout
//!
//! ```text
//! [Title]
//! [Count line]             (list and confirm screens)
//! [Filter bar]             (when a filter is set or being typed)
//! [Column headers]
//! [Rule]
//! [Rows / dialog / report]
//! [Scroll indicator]
//! [Status]                 (while a status is live)
//! [Legend or help panel]
//! [Error banner]           (while a load error is set)
//! ```

pub mod dialog;
pub mod empty;
pub mod filter;
pub mod footer;
pub mod header;
pub mod health;
pub mod table;
