//! Report post-processing and sharing helpers

pub mod postprocess;
pub mod share;

pub use postprocess::{MarkdownReportProcessor, ReportExtractor, REPORT_TEMPLATE_VERSION};
pub use share::{clipboard_text, mailto_link, share_text};
