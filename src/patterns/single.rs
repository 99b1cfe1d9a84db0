/**
* filename : single
* author : HAMA
* date: 2025. 5. 11.
* description: 단일 캔들 패턴 (Hammer, Doji, Marubozu)
**/

use crate::models::{Candle, PatternType};
use super::{CandlePattern, CandleRatios, PatternMatch};

/// 짧은 몸통 + 긴 아래꼬리 + 거의 없는 위꼬리
#[derive(Debug, Clone, Copy, Default)]
pub struct Hammer;

impl CandlePattern for Hammer {
  fn family(&self) -> &'static str {
    "Hammer"
  }

  fn window(&self) -> usize {
    1
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let ratios = CandleRatios::of(window.last()?)?;

    if ratios.body < 0.3 && ratios.lower_shadow > 0.6 && ratios.upper_shadow < 0.1 {
      return Some(PatternMatch::new(
        "Hammer",
        PatternType::Bullish,
        0.5 + ratios.lower_shadow - ratios.body,
        "Small body with a long lower shadow, potential bullish reversal",
      ));
    }
    None
  }
}

/// 시가와 종가가 거의 같은 캔들. 범위가 0인 캔들은 완전한 도지로 본다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Doji;

impl CandlePattern for Doji {
  fn family(&self) -> &'static str {
    "Doji"
  }

  fn window(&self) -> usize {
    1
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let candle = window.last()?;
    let body_ratio = CandleRatios::of(candle).map(|r| r.body).unwrap_or(0.0);

    if body_ratio < 0.05 {
      return Some(PatternMatch::new(
        "Doji",
        PatternType::Neutral,
        0.8 - 10.0 * body_ratio,
        "Open and close nearly equal, market indecision",
      ));
    }
    None
  }
}

/// 꼬리가 거의 없는 장대 캔들
#[derive(Debug, Clone, Copy, Default)]
pub struct Marubozu;

impl CandlePattern for Marubozu {
  fn family(&self) -> &'static str {
    "Marubozu"
  }

  fn window(&self) -> usize {
    1
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let candle = window.last()?;
    let ratios = CandleRatios::of(candle)?;
    let shadow_ratio = ratios.upper_shadow + ratios.lower_shadow;

    if ratios.body > 0.9 && shadow_ratio < 0.1 {
      let (name, pattern_type, description) = if candle.is_bullish() {
        ("Bullish Marubozu", PatternType::Bullish, "Full bullish body with almost no shadows, strong buying")
      } else {
        ("Bearish Marubozu", PatternType::Bearish, "Full bearish body with almost no shadows, strong selling")
      };
      return Some(PatternMatch::new(name, pattern_type, ratios.body, description));
    }
    None
  }
}
