//! The form record: manually observed technical inputs for one ticker

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart granularity used to key several input groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1D")]
    D1,
    #[serde(rename = "1W")]
    W1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::H2, Timeframe::H4, Timeframe::D1, Timeframe::W1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1D",
            Timeframe::W1 => "1W",
        }
    }

    /// Label used in the prompt ("Daily" rather than "1D")
    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "Daily",
            Timeframe::W1 => "Weekly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2h" => Ok(Timeframe::H2),
            "4h" => Ok(Timeframe::H4),
            "1D" => Ok(Timeframe::D1),
            "1W" => Ok(Timeframe::W1),
            other => Err(format!("unknown timeframe: {}", other)),
        }
    }
}

/// One free-text value per timeframe; every key always exists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeframeMap {
    #[serde(rename = "2h")]
    pub h2: String,
    #[serde(rename = "4h")]
    pub h4: String,
    #[serde(rename = "1D")]
    pub d1: String,
    #[serde(rename = "1W")]
    pub w1: String,
}

impl TimeframeMap {
    pub fn get(&self, timeframe: Timeframe) -> &str {
        match timeframe {
            Timeframe::H2 => &self.h2,
            Timeframe::H4 => &self.h4,
            Timeframe::D1 => &self.d1,
            Timeframe::W1 => &self.w1,
        }
    }

    pub fn set(&mut self, timeframe: Timeframe, value: impl Into<String>) {
        let slot = match timeframe {
            Timeframe::H2 => &mut self.h2,
            Timeframe::H4 => &mut self.h4,
            Timeframe::D1 => &mut self.d1,
            Timeframe::W1 => &mut self.w1,
        };
        *slot = value.into();
    }

    /// Copy of this group with one timeframe replaced
    pub fn with(&self, timeframe: Timeframe, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(timeframe, value);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &str)> {
        Timeframe::ALL.into_iter().map(move |tf| (tf, self.get(tf)))
    }

    pub fn any_filled(&self) -> bool {
        self.iter().any(|(_, value)| is_filled(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepSlot {
    Sweep1,
    Sweep2,
}

/// The two most recent weekly liquidity sweeps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySweep {
    pub sweep1: String,
    pub sweep2: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFibLevel {
    #[serde(rename = "t0")]
    Zero,
    #[serde(rename = "t0_618")]
    P618,
    #[serde(rename = "t0_786")]
    P786,
    #[serde(rename = "t1_618")]
    Ext1618,
}

impl TimeFibLevel {
    pub fn ratio_label(&self) -> &'static str {
        match self {
            TimeFibLevel::Zero => "0.0",
            TimeFibLevel::P618 => "0.618",
            TimeFibLevel::P786 => "0.786",
            TimeFibLevel::Ext1618 => "1.618",
        }
    }
}

/// Time-based Fibonacci projections; ticker-agnostic session context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeFibs {
    pub t0: String,
    pub t0_618: String,
    pub t0_786: String,
    pub t1_618: String,
}

impl TimeFibs {
    pub const LEVELS: [TimeFibLevel; 4] = [
        TimeFibLevel::Zero,
        TimeFibLevel::P618,
        TimeFibLevel::P786,
        TimeFibLevel::Ext1618,
    ];

    pub fn get(&self, level: TimeFibLevel) -> &str {
        match level {
            TimeFibLevel::Zero => &self.t0,
            TimeFibLevel::P618 => &self.t0_618,
            TimeFibLevel::P786 => &self.t0_786,
            TimeFibLevel::Ext1618 => &self.t1_618,
        }
    }

    pub fn set(&mut self, level: TimeFibLevel, value: impl Into<String>) {
        let slot = match level {
            TimeFibLevel::Zero => &mut self.t0,
            TimeFibLevel::P618 => &mut self.t0_618,
            TimeFibLevel::P786 => &mut self.t0_786,
            TimeFibLevel::Ext1618 => &mut self.t1_618,
        };
        *slot = value.into();
    }
}

/// Complete form record. The shape is total: empty means `""`, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalData {
    pub current_price: String,
    pub support_resistance: TimeframeMap,
    pub weekly_sweep: WeeklySweep,
    pub fvg_fibs: TimeframeMap,
    pub candle_fibs: TimeframeMap,
    pub time_fibs: TimeFibs,
    pub time_fibs_timeframe: Timeframe,
}

/// A single-field edit; applying one replaces only the touched group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldEdit {
    CurrentPrice(String),
    SupportResistance(Timeframe, String),
    WeeklySweep(SweepSlot, String),
    FvgFib(Timeframe, String),
    CandleFib(Timeframe, String),
    TimeFib(TimeFibLevel, String),
    TimeFibsTimeframe(Timeframe),
}

impl TechnicalData {
    /// True when any ticker-specific input has content.
    ///
    /// `time_fibs` and `time_fibs_timeframe` are excluded: they are carried
    /// across ticker switches and never count as unsaved work.
    pub fn has_user_input(&self) -> bool {
        is_filled(&self.current_price)
            || self.support_resistance.any_filled()
            || is_filled(&self.weekly_sweep.sweep1)
            || is_filled(&self.weekly_sweep.sweep2)
            || self.fvg_fibs.any_filled()
            || self.candle_fibs.any_filled()
    }

    /// Empty baseline that keeps the time-fib context of `self`
    pub fn reset_keeping_time_fibs(&self) -> Self {
        Self {
            time_fibs: self.time_fibs.clone(),
            time_fibs_timeframe: self.time_fibs_timeframe,
            ..Self::default()
        }
    }

    /// Returns the record with `edit` merged at the group level
    pub fn apply(&self, edit: FieldEdit) -> Self {
        let mut next = self.clone();
        match edit {
            FieldEdit::CurrentPrice(value) => next.current_price = value,
            FieldEdit::SupportResistance(tf, value) => {
                next.support_resistance = self.support_resistance.with(tf, value)
            }
            FieldEdit::WeeklySweep(slot, value) => {
                let mut sweep = self.weekly_sweep.clone();
                match slot {
                    SweepSlot::Sweep1 => sweep.sweep1 = value,
                    SweepSlot::Sweep2 => sweep.sweep2 = value,
                }
                next.weekly_sweep = sweep;
            }
            FieldEdit::FvgFib(tf, value) => next.fvg_fibs = self.fvg_fibs.with(tf, value),
            FieldEdit::CandleFib(tf, value) => next.candle_fibs = self.candle_fibs.with(tf, value),
            FieldEdit::TimeFib(level, value) => {
                let mut fibs = self.time_fibs.clone();
                fibs.set(level, value);
                next.time_fibs = fibs;
            }
            FieldEdit::TimeFibsTimeframe(tf) => next.time_fibs_timeframe = tf,
        }
        next
    }
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
