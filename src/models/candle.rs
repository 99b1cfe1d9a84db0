use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One OHLCV sample for a fixed time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Candle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 몸통 길이
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// 고가 - 저가
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.body_top()
    }

    pub fn lower_shadow(&self) -> f64 {
        self.body_bottom() - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// (고가 + 저가 + 종가) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// 가격이 캔들의 고저 범위 안에 있는지
    pub fn touches(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// Time-ascending candle sequence for one timeframe.
///
/// Construction rejects out-of-order or duplicate timestamps and malformed
/// candles, so every consumer can rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, AnalysisError> {
        for (i, candle) in candles.iter().enumerate() {
            let fields = [candle.open, candle.high, candle.low, candle.close, candle.volume];
            if fields.iter().any(|v| !v.is_finite()) {
                return Err(AnalysisError::InvalidData(format!("non-finite value in candle {}", i)));
            }
            if candle.high < candle.low {
                return Err(AnalysisError::InvalidData(format!("high below low in candle {}", i)));
            }
            if !candle.touches(candle.open) || !candle.touches(candle.close) {
                return Err(AnalysisError::InvalidData(format!(
                    "open/close outside the high-low range in candle {}",
                    i
                )));
            }
            if candle.volume < 0.0 {
                return Err(AnalysisError::InvalidData(format!("negative volume in candle {}", i)));
            }
        }

        if let Some(pos) = candles.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(AnalysisError::InvalidData(format!(
                "timestamps must be strictly ascending (candle {} at {})",
                pos + 1,
                candles[pos + 1].timestamp
            )));
        }

        Ok(CandleSeries { candles })
    }

    /// 분석 최소 길이 검증
    pub fn ensure_min_len(&self, timeframe: &str, required: usize) -> Result<(), AnalysisError> {
        if self.candles.len() < required {
            return Err(AnalysisError::InsufficientData {
                timeframe: timeframe.to_string(),
                got: self.candles.len(),
                required,
            });
        }
        Ok(())
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
