//! Copy, share and email renderings of a finished analysis

use crate::models::AnalysisView;
use url::form_urlencoded;

/// Report markdown followed by the grounding sources
pub fn clipboard_text(view: &AnalysisView) -> String {
    let mut text = view.report.display_markdown.clone();
    if !view.grounding_sources.is_empty() {
        text.push_str("\n\nSources:\n");
        for source in &view.grounding_sources {
            text.push_str(&format!("- {} ({})\n", source.title, source.uri));
        }
    }
    text
}

/// Short blurb for social sharing
pub fn share_text(view: &AnalysisView) -> String {
    if !view.report.social_summary.is_empty() {
        return view.report.social_summary.clone();
    }
    if view.report.confidence_score > 0.0 {
        format!(
            "{} technical analysis - AI conviction {}/10",
            view.ticker, view.report.confidence_score
        )
    } else {
        format!("{} technical analysis", view.ticker)
    }
}

/// `mailto:` link carrying the full report in the body
pub fn mailto_link(view: &AnalysisView) -> String {
    let subject = format!("{} Technical Analysis", view.ticker);
    format!(
        "mailto:?subject={}&body={}",
        encode_component(&subject),
        encode_component(&clipboard_text(view))
    )
}

// form_urlencoded writes spaces as '+', mail clients expect %20. A literal '+'
// is already escaped to %2B so the swap is unambiguous.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
