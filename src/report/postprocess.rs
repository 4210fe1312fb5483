//! Best-effort extraction of structured fields from report markdown
//!
//! Rules run in order, each on the residue left by the previous one:
//! 1. trailing "Social Media Summary" section
//! 2. "AI Conviction Score: x/10 (reason)" line
//!
//! A miss is never an error; the field keeps its empty default.

use crate::models::ProcessedReport;
use regex::Regex;

/// Version of the response template these rules expect (see the prompt builder)
pub const REPORT_TEMPLATE_VERSION: u32 = 2;

pub trait ReportExtractor: Send + Sync {
    fn extract(&self, markdown: &str) -> ProcessedReport;
}

pub struct MarkdownReportProcessor {
    social_heading: Regex,
    conviction_line: Regex,
}

impl MarkdownReportProcessor {
    pub fn new() -> Self {
        let social_heading = Regex::new(concat!(
            r"(?mi)^[ \t]*#{1,6}[ \t]*(?:\d+\.[ \t]*)?\**[ \t]*social media summary",
            r"[ \t]*\**[ \t]*[:-]?[ \t]*\**[ \t]*([^\n]*)\n?",
        ))
        .expect("regex social heading");
        let conviction_line = Regex::new(concat!(
            r"(?mi)^[ \t]*(?:[-*>][ \t]+)?\**[ \t]*AI Conviction Score[ \t]*\**[ \t]*:",
            r"[ \t]*\**[ \t]*(\d+(?:\.\d+)?)[ \t]*/[ \t]*10[ \t]*\**",
            r"(?:[ \t]*\(([^\n]*)\))?[^\n]*(?:\n|$)",
        ))
        .expect("regex conviction line");

        Self {
            social_heading,
            conviction_line,
        }
    }

    /// Splits off the last social summary section: (residual, summary).
    /// Text on the heading line itself opens the summary.
    fn split_social_summary(&self, text: &str) -> Option<(String, String)> {
        let caps = self.social_heading.captures_iter(text).last()?;
        let heading = caps.get(0)?;
        let inline = caps
            .get(1)
            .map(|m| m.as_str().trim().trim_end_matches('*').trim_end())
            .unwrap_or_default();
        let body = text[heading.end()..].trim();

        let summary = match (inline.is_empty(), body.is_empty()) {
            (true, _) => body.to_string(),
            (false, true) => inline.to_string(),
            (false, false) => format!("{}\n{}", inline, body),
        };
        Some((text[..heading.start()].to_string(), summary))
    }

    /// Reads the first score line and strips every score line from the text
    fn take_conviction(&self, text: &str) -> Option<(String, f64, String)> {
        let caps = self.conviction_line.captures(text)?;
        let score = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|s| s.clamp(0.0, 10.0))
            .unwrap_or(0.0);
        let reason = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let residual = self.conviction_line.replace_all(text, "").into_owned();
        Some((residual, score, reason))
    }
}

impl Default for MarkdownReportProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExtractor for MarkdownReportProcessor {
    fn extract(&self, markdown: &str) -> ProcessedReport {
        let mut report = ProcessedReport::default();
        let mut working = markdown.to_string();
        let mut stripped = false;

        if let Some((residual, summary)) = self.split_social_summary(&working) {
            report.social_summary = summary;
            working = residual;
            stripped = true;
        }

        if let Some((residual, score, reason)) = self.take_conviction(&working) {
            report.confidence_score = score;
            report.conviction_reason = reason;
            working = residual;
            stripped = true;
        }

        report.display_markdown = if stripped {
            working.trim_end().to_string()
        } else {
            working
        };
        report
    }
}
