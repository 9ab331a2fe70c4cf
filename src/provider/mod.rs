//! Data provider: the `zfs` command line and the dispatcher that runs it.
//!
//! - [`zfs`]: argv builders and `zfs list` output parsers
//! - [`dispatch`]: fan-out of commands to host effects and fan-in of their results

pub mod dispatch;
pub mod zfs;

pub use dispatch::{Dispatcher, Effect};
pub use zfs::ZfsCli;
