//! Output module for exports and run reports
//!
//! This module handles:
//! - CSV and JSON export of the merged article collection
//! - The tabular view used for summaries
//! - Run reports on the console and as markdown

mod export;
mod markdown;
mod report;
pub mod stats;
mod tabular;

pub use export::{parse_json, to_csv_string, to_json_value, write_export, ExportError, ExportFormat, COLUMNS};
pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{PortalReport, RunReport};
pub use stats::{format_data_summary, print_data_summary, print_report};
pub use tabular::TabularView;
