//! Storage layer for the health report.
//!
//! The health report is written by the external monitor service and read here.
//!
//! # Modules
//!
//! - `backend`: [`ReportStore`] trait abstraction for report sources
//! - `json`: JSON file-based implementation

pub mod backend;
pub mod json;

pub use backend::ReportStore;
pub use json::{JsonReportStore, DEFAULT_REPORT_PATH};
