/**
* filename : indicator
* author : HAMA
* date: 2025. 5. 11.
* description: 지표 계산 결과 모델
**/

use serde::{Deserialize, Serialize};

/// Coarse per-indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorSignal {
    Bullish,
    Bearish,
    Neutral,
    Overbought,
    Oversold,
}

impl IndicatorSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorSignal::Bullish => "BULLISH",
            IndicatorSignal::Bearish => "BEARISH",
            IndicatorSignal::Neutral => "NEUTRAL",
            IndicatorSignal::Overbought => "OVERBOUGHT",
            IndicatorSignal::Oversold => "OVERSOLD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaType {
    Sma,
    Ema,
}

// 배열 값은 미정의 구간이 0으로 채워지고, current_* 필드는 None으로 남는다.
// 하위 소비자가 입력 길이와 같은 고정 길이 배열에 의존하므로 이 규칙을 유지한다.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaResult {
    pub name: String,
    pub values: Vec<f64>,
    pub current_value: Option<f64>,
    pub signal: IndicatorSignal,
    pub period: usize,
    pub ma_type: MaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiResult {
    pub name: String,
    pub values: Vec<f64>,
    pub current_value: Option<f64>,
    pub signal: IndicatorSignal,
    pub period: usize,
    pub overbought_level: f64,
    pub oversold_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub name: String,
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
    pub current_macd: Option<f64>,
    pub current_signal: Option<f64>,
    pub current_histogram: Option<f64>,
    pub signal: IndicatorSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandResult {
    pub name: String,
    pub upper_band: Vec<f64>,
    pub middle_band: Vec<f64>,
    pub lower_band: Vec<f64>,
    pub current_upper: Option<f64>,
    pub current_middle: Option<f64>,
    pub current_lower: Option<f64>,
    pub current_price: Option<f64>,
    pub signal: IndicatorSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VwapResult {
    pub name: String,
    pub values: Vec<f64>,
    pub current_value: Option<f64>,
    pub signal: IndicatorSignal,
}

/// Any indicator stored in a `TimeframeAnalysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorResult {
    MovingAverage(MaResult),
    Rsi(RsiResult),
    Macd(MacdResult),
    Bollinger(BollingerBandResult),
    Vwap(VwapResult),
}

impl IndicatorResult {
    pub fn name(&self) -> &str {
        match self {
            IndicatorResult::MovingAverage(r) => &r.name,
            IndicatorResult::Rsi(r) => &r.name,
            IndicatorResult::Macd(r) => &r.name,
            IndicatorResult::Bollinger(r) => &r.name,
            IndicatorResult::Vwap(r) => &r.name,
        }
    }

    pub fn signal(&self) -> IndicatorSignal {
        match self {
            IndicatorResult::MovingAverage(r) => r.signal,
            IndicatorResult::Rsi(r) => r.signal,
            IndicatorResult::Macd(r) => r.signal,
            IndicatorResult::Bollinger(r) => r.signal,
            IndicatorResult::Vwap(r) => r.signal,
        }
    }

    /// 대표 현재값 (MACD는 MACD 라인, 볼린저는 중심선)
    pub fn current_value(&self) -> Option<f64> {
        match self {
            IndicatorResult::MovingAverage(r) => r.current_value,
            IndicatorResult::Rsi(r) => r.current_value,
            IndicatorResult::Macd(r) => r.current_macd,
            IndicatorResult::Bollinger(r) => r.current_middle,
            IndicatorResult::Vwap(r) => r.current_value,
        }
    }
}
