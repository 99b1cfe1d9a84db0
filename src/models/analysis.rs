use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::indicator::IndicatorResult;
use super::level::{LevelBreak, PriceActionSignal, SupportResistanceLevel, SupportResistanceResult};
use super::pattern::PatternResult;

/// Result of one analysis run over one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeAnalysis {
    pub timeframe: String,
    pub data_points: usize,
    pub indicators: BTreeMap<String, IndicatorResult>,
    pub candlestick_patterns: BTreeMap<String, PatternResult>,
    pub support_resistance: Option<SupportResistanceResult>,
}

impl TimeframeAnalysis {
    pub fn new(timeframe: impl Into<String>, data_points: usize) -> Self {
        TimeframeAnalysis {
            timeframe: timeframe.into(),
            data_points,
            indicators: BTreeMap::new(),
            candlestick_patterns: BTreeMap::new(),
            support_resistance: None,
        }
    }

    pub fn add_indicator(&mut self, key: impl Into<String>, result: IndicatorResult) {
        self.indicators.insert(key.into(), result);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallSignals {
    pub bullish_percentage: f64,
    pub bearish_percentage: f64,
    pub neutral_percentage: f64,
}

/// 패턴 계열별 전 타임프레임 집계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternRollup {
    pub total_occurrences: usize,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub neutral_count: usize,
    pub timeframes: Vec<String>,
    pub most_recent: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeLevel {
    pub timeframe: String,
    #[serde(flatten)]
    pub level: SupportResistanceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeBreak {
    pub timeframe: String,
    #[serde(flatten)]
    pub level_break: LevelBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceSummary {
    pub total_support_levels: usize,
    pub total_resistance_levels: usize,
    pub strongest_support: Option<TimeframeLevel>,
    pub strongest_resistance: Option<TimeframeLevel>,
    pub price_action_signals: BTreeMap<String, PriceActionSignal>,
    pub recent_breaks: Vec<TimeframeBreak>,
}

/// Cross-timeframe rollup, recomputed on every aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_timeframes: usize,
    pub indicators_calculated: Vec<String>,
    pub overall_signals: OverallSignals,
    pub pattern_summary: BTreeMap<String, PatternRollup>,
    pub support_resistance_summary: SupportResistanceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysisRequest {
    pub stock_name: String,
    pub timeframes: Vec<String>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysisResponse {
    pub analysis_id: uuid::Uuid,
    pub stock_name: String,
    pub analysis_date: DateTime<Utc>,
    pub timeframe_results: Vec<TimeframeAnalysis>,
    pub summary: AnalysisSummary,
    pub ai_opinion: Option<String>,
}
