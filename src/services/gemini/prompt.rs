//! Deterministic analysis prompt

use crate::models::{TechnicalData, TimeFibs, Timeframe, TimeframeMap};
use std::fmt::Write;

fn push_timeframes(out: &mut String, heading: &str, values: &TimeframeMap) {
    let _ = writeln!(out, "{}", heading);
    for (tf, value) in values.iter() {
        let _ = writeln!(out, "   - {}: {}", tf.display_name(), value);
    }
    out.push('\n');
}

fn push_time_fibs(out: &mut String, timeframe: Timeframe, fibs: &TimeFibs) {
    let _ = writeln!(out, "6. Time Vertical Fibs (Based on {} Chart):", timeframe);
    for level in TimeFibs::LEVELS {
        let _ = writeln!(out, "   - {}: {}", level.ratio_label(), fibs.get(level));
    }
    out.push('\n');
}

/// Builds the analysis prompt for `ticker`. Identical inputs always produce
/// identical text.
pub fn build_prompt(ticker: &str, data: &TechnicalData) -> String {
    let mut out = String::with_capacity(4096);

    let _ = writeln!(out, "Act as a world-class cryptocurrency technical analyst.");
    let _ = writeln!(out, "Perform a deep analysis for the ticker: {}.", ticker);
    out.push('\n');
    let _ = writeln!(out, "Technical inputs observed by the trader:");
    out.push('\n');

    let price = if data.current_price.trim().is_empty() {
        "Please fetch current price"
    } else {
        data.current_price.as_str()
    };
    let _ = writeln!(out, "1. Current Price (Reference): {}", price);
    out.push('\n');

    push_timeframes(
        &mut out,
        "2. Support & Resistance Levels (per timeframe):",
        &data.support_resistance,
    );

    let _ = writeln!(out, "3. Weekly Sweeps (Liquidity Grabs):");
    let _ = writeln!(out, "   - Event 1: {}", data.weekly_sweep.sweep1);
    let _ = writeln!(out, "   - Event 2: {}", data.weekly_sweep.sweep2);
    out.push('\n');

    push_timeframes(&mut out, "4. FVG (Fair Value Gap) Fibs:", &data.fvg_fibs);
    push_timeframes(&mut out, "5. Candle Fibs:", &data.candle_fibs);
    push_time_fibs(&mut out, data.time_fibs_timeframe, &data.time_fibs);

    let _ = writeln!(out, "TASK:");
    let _ = writeln!(
        out,
        "Write a comprehensive report combining these technicals with live market data from web search."
    );
    let _ = writeln!(out, "Search specifically for:");
    let _ = writeln!(
        out,
        "- Hyperliquid whale positions and smart-money positioning relevant to {}.",
        ticker
    );
    let _ = writeln!(out, "- Recent impactful X / Twitter sentiment regarding {}.", ticker);
    out.push('\n');

    let _ = writeln!(out, "OUTPUT FORMAT (Markdown):");
    out.push('\n');
    let _ = writeln!(out, "## {} Technical Analysis", ticker);
    out.push('\n');
    let _ = writeln!(out, "### 1. 2H & 4H Analysis (Lower Time Frame)");
    let _ = writeln!(
        out,
        "*Synthesize the 2h and 4h levels, FVG fibs and candle fibs. Identify trends, entries and invalidation points.*"
    );
    out.push('\n');
    let _ = writeln!(out, "### 2. High Time Frame Analysis (Daily & Weekly)");
    let _ = writeln!(
        out,
        "*Synthesize daily/weekly levels, weekly sweeps and major fib levels. Determine the macro bias.*"
    );
    out.push('\n');
    let _ = writeln!(out, "### 3. Hyperliquid Whale Positions & Smart Money");
    let _ = writeln!(
        out,
        "*Summarize open interest, funding rates and whale movements found via search.*"
    );
    out.push('\n');
    let _ = writeln!(out, "### 4. Market Sentiment (X / Twitter)");
    let _ = writeln!(
        out,
        "*Summarize current social sentiment and what key opinion leaders are saying.*"
    );
    out.push('\n');
    let _ = writeln!(out, "### 5. Final Summary");
    let _ = writeln!(
        out,
        "*Actionable bias (Long/Short/Neutral) with key levels to watch, using the time vertical fibs and price levels.*"
    );
    out.push('\n');
    let _ = writeln!(out, "End section 5 with exactly one line in this form:");
    let _ = writeln!(out, "**AI Conviction Score:** <score from 0 to 10>/10 (<short rationale>)");
    out.push('\n');
    let _ = writeln!(out, "### Social Media Summary");
    let _ = writeln!(
        out,
        "*Finish with this section: a post of at most 280 characters summarizing the call. Nothing may follow it.*"
    );

    out
}
