//! Unit tests for report post-processing

use crypto_analyst::report::{MarkdownReportProcessor, ReportExtractor};

const REPORT: &str = "## BTCUSD Technical Analysis\n\n### 5. Final Summary\nBias: Long above 96k.\n**AI Conviction Score:** 7.5/10 (Strong Confluence)\n\n### Social Media Summary\nBTC reclaiming 96k! Bulls eye 100k... (NFA) #BTC, $BTC.\n";

#[test]
fn test_extracts_score_reason_and_summary() {
    let report = MarkdownReportProcessor::new().extract(REPORT);

    assert_eq!(report.confidence_score, 7.5);
    assert_eq!(report.conviction_reason, "Strong Confluence");
    assert_eq!(
        report.social_summary,
        "BTC reclaiming 96k! Bulls eye 100k... (NFA) #BTC, $BTC."
    );
    assert!(!report.display_markdown.contains("AI Conviction Score"));
    assert!(!report.display_markdown.contains("Social Media Summary"));
    assert!(report.display_markdown.ends_with("Bias: Long above 96k."));
}

#[test]
fn test_conviction_line_is_removed_exactly() {
    let markdown = "Intro\n**AI Conviction Score:** 7.5/10 (Strong Confluence)\nOutro";
    let report = MarkdownReportProcessor::new().extract(markdown);

    assert_eq!(report.confidence_score, 7.5);
    assert_eq!(report.conviction_reason, "Strong Confluence");
    assert_eq!(report.display_markdown, "Intro\nOutro");
    assert_eq!(report.social_summary, "");
}

#[test]
fn test_no_match_returns_markdown_unchanged() {
    let markdown = "## ETHUSD\n\nNo trailers here.\n\n";
    let report = MarkdownReportProcessor::new().extract(markdown);

    assert_eq!(report.display_markdown, markdown);
    assert_eq!(report.confidence_score, 0.0);
    assert_eq!(report.conviction_reason, "");
    assert_eq!(report.social_summary, "");
}

#[test]
fn test_reason_is_optional_and_plain_label_matches() {
    let report = MarkdownReportProcessor::new().extract("AI Conviction Score: 8/10\nrest");
    assert_eq!(report.confidence_score, 8.0);
    assert_eq!(report.conviction_reason, "");
    assert_eq!(report.display_markdown, "rest");
}

#[test]
fn test_unparsable_score_is_left_in_place() {
    let markdown = "**AI Conviction Score:** N/A (no data)";
    let report = MarkdownReportProcessor::new().extract(markdown);
    assert_eq!(report.confidence_score, 0.0);
    assert_eq!(report.display_markdown, markdown);
}

#[test]
fn test_out_of_range_score_is_clamped() {
    let report =
        MarkdownReportProcessor::new().extract("**AI Conviction Score:** 12/10 (Very sure)");
    assert_eq!(report.confidence_score, 10.0);
}

#[test]
fn test_numbered_heading_and_last_section_wins() {
    let markdown =
        "### 6. Social Media Summary\nfirst\n\n## Social Media Summary\nsecond: final take!";
    let report = MarkdownReportProcessor::new().extract(markdown);
    assert_eq!(report.social_summary, "second: final take!");
    assert!(report.display_markdown.ends_with("first"));
}

#[test]
fn test_summary_is_extracted_before_score() {
    // A score line inside the summary section leaves with the summary
    let markdown = "Body\n### Social Media Summary\nAI Conviction Score: 9/10 (hype)";
    let report = MarkdownReportProcessor::new().extract(markdown);
    assert_eq!(report.social_summary, "AI Conviction Score: 9/10 (hype)");
    assert_eq!(report.confidence_score, 0.0);
    assert_eq!(report.display_markdown, "Body");
}

#[test]
fn test_summary_on_heading_line_is_kept() {
    let processor = MarkdownReportProcessor::new();

    let report = processor.extract("Body\n### Social Media Summary: BTC breaking out above 96k!\n");
    assert_eq!(report.social_summary, "BTC breaking out above 96k!");
    assert_eq!(report.display_markdown, "Body");

    let report = processor.extract("Body\n### **Social Media Summary:** Bulls in control\n#BTC");
    assert_eq!(report.social_summary, "Bulls in control\n#BTC");
}

#[test]
fn test_nested_parentheses_in_reason() {
    let markdown = "Intro\n**AI Conviction Score:** 6/10 (Strong (HTF) confluence)\nOutro";
    let report = MarkdownReportProcessor::new().extract(markdown);
    assert_eq!(report.conviction_reason, "Strong (HTF) confluence");
    assert_eq!(report.display_markdown, "Intro\nOutro");
}

#[test]
fn test_first_score_wins_and_every_score_line_is_removed() {
    let markdown = "AI Conviction Score: 7/10 (first)\nBody\nAI Conviction Score: 3/10 (second)\n";
    let report = MarkdownReportProcessor::new().extract(markdown);
    assert_eq!(report.confidence_score, 7.0);
    assert_eq!(report.conviction_reason, "first");
    assert_eq!(report.display_markdown, "Body");
}
