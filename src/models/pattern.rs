use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Bullish,
    Bearish,
    Neutral,
}

/// 캔들스틱 패턴 발생 1건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickPattern {
    pub name: String,
    pub pattern_type: PatternType,
    /// 0.0 ~ 0.9
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub candle_index: usize,
}

/// 패턴 계열별 스캔 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub pattern_name: String,
    pub occurrences: Vec<CandlestickPattern>,
    pub total_count: usize,
    pub last_occurrence: Option<DateTime<Utc>>,
}

impl PatternResult {
    pub fn new(pattern_name: impl Into<String>, occurrences: Vec<CandlestickPattern>) -> Self {
        let last_occurrence = occurrences.last().map(|p| p.timestamp);
        PatternResult {
            pattern_name: pattern_name.into(),
            total_count: occurrences.len(),
            occurrences,
            last_occurrence,
        }
    }

    pub fn count_of(&self, pattern_type: PatternType) -> usize {
        self.occurrences.iter().filter(|p| p.pattern_type == pattern_type).count()
    }
}
