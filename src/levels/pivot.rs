/**
* filename : pivot
* author : HAMA
* date: 2025. 5. 12.
* description: 스윙 고점/저점 기반 레벨
**/

use crate::models::{Candle, LevelType, SupportResistanceLevel};
use crate::utils::math::{average, clamp, distance_pct};
use super::{touch_stats, LevelDetector};

/// 좌우 `window`개 캔들보다 엄격히 높은 고가(저항) / 낮은 저가(지지)
#[derive(Debug, Clone)]
pub struct PivotDetector {
  window: usize,
}

impl PivotDetector {
  pub fn new(window: usize) -> Self {
    PivotDetector { window }
  }

  // 양쪽 윈도우 평균 대비 편차(%)의 2배, 1~10
  fn strength(value: f64, flanks: &[f64]) -> f64 {
    let deviation = average(flanks).map(|avg| distance_pct(value, avg)).unwrap_or(0.0);
    clamp(2.0 * deviation, 1.0, 10.0)
  }

  fn level(candles: &[Candle], price: f64, level_type: LevelType, strength: f64) -> SupportResistanceLevel {
    let (touches, last_touch) = touch_stats(candles, price);
    SupportResistanceLevel::provisional(price, level_type, strength, touches.max(1)).with_last_touch(last_touch)
  }
}

impl LevelDetector for PivotDetector {
  fn name(&self) -> &'static str {
    "pivot"
  }

  fn detect(&self, candles: &[Candle], _current_price: f64) -> Vec<SupportResistanceLevel> {
    let w = self.window;
    let mut levels = Vec::new();
    if w == 0 || candles.len() < 2 * w + 1 {
      return levels;
    }

    for i in w..candles.len() - w {
      let left = &candles[i - w..i];
      let right = &candles[i + 1..=i + w];
      let candle = &candles[i];

      let is_swing_high = left.iter().chain(right).all(|c| candle.high > c.high);
      if is_swing_high {
        let flanks: Vec<f64> = left.iter().chain(right).map(|c| c.high).collect();
        let strength = Self::strength(candle.high, &flanks);
        levels.push(Self::level(candles, candle.high, LevelType::Resistance, strength));
      }

      let is_swing_low = left.iter().chain(right).all(|c| candle.low < c.low);
      if is_swing_low {
        let flanks: Vec<f64> = left.iter().chain(right).map(|c| c.low).collect();
        let strength = Self::strength(candle.low, &flanks);
        levels.push(Self::level(candles, candle.low, LevelType::Support, strength));
      }
    }

    levels
  }
}
