/**
* filename : double
* author : HAMA
* date: 2025. 5. 11.
* description: 이중 캔들 패턴 (Engulfing, Harami)
**/

use crate::models::{Candle, PatternType};
use super::{has_range, CandlePattern, PatternMatch};

/// 직전 캔들의 몸통과 고저를 모두 감싸는 반대 방향 캔들
#[derive(Debug, Clone, Copy, Default)]
pub struct Engulfing;

impl CandlePattern for Engulfing {
  fn family(&self) -> &'static str {
    "Engulfing"
  }

  fn window(&self) -> usize {
    2
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let [previous, current] = window else {
      return None;
    };
    if !has_range(window) || previous.body() <= 0.0 {
      return None;
    }

    let contains_body = current.body_bottom() < previous.body_bottom() && current.body_top() > previous.body_top();
    let contains_range = current.high >= previous.high && current.low <= previous.low;
    if !contains_body || !contains_range {
      return None;
    }

    let confidence = 0.6 + 0.1 * (current.body() / previous.body());

    if previous.is_bearish() && current.is_bullish() {
      Some(PatternMatch::new(
        "Bullish Engulfing",
        PatternType::Bullish,
        confidence,
        "Bullish candle engulfs the previous bearish candle",
      ))
    } else if previous.is_bullish() && current.is_bearish() {
      Some(PatternMatch::new(
        "Bearish Engulfing",
        PatternType::Bearish,
        confidence,
        "Bearish candle engulfs the previous bullish candle",
      ))
    } else {
      None
    }
  }
}

/// 직전 몸통 안에 들어가는 절반 미만 크기의 캔들. 직전 방향의 반전으로 분류
#[derive(Debug, Clone, Copy, Default)]
pub struct Harami;

impl CandlePattern for Harami {
  fn family(&self) -> &'static str {
    "Harami"
  }

  fn window(&self) -> usize {
    2
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let [previous, current] = window else {
      return None;
    };
    if !has_range(window) || previous.body() <= 0.0 {
      return None;
    }

    let inside = current.body_top() <= previous.body_top() && current.body_bottom() >= previous.body_bottom();
    let body_ratio = current.body() / previous.body();
    if !inside || body_ratio >= 0.5 {
      return None;
    }

    let confidence = 0.7 - body_ratio;

    if previous.is_bearish() {
      Some(PatternMatch::new(
        "Bullish Harami",
        PatternType::Bullish,
        confidence,
        "Small candle inside the previous bearish body, potential bullish reversal",
      ))
    } else {
      Some(PatternMatch::new(
        "Bearish Harami",
        PatternType::Bearish,
        confidence,
        "Small candle inside the previous bullish body, potential bearish reversal",
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::candle;

  #[test]
  fn test_bearish_engulfing() {
    let previous = candle(0, 100.0, 106.0, 99.0, 105.0, 100.0);
    let current = candle(1, 106.0, 107.0, 98.0, 99.0, 100.0);
    let found = Engulfing.check(&[previous, current]).unwrap();

    assert_eq!(found.name, "Bearish Engulfing");
    assert_eq!(found.pattern_type, PatternType::Bearish);
    // 0.6 + 0.1 * 7/5
    assert!((found.confidence - 0.74).abs() < 1e-9);
  }

  #[test]
  fn test_engulfing_requires_range_envelope() {
    let previous = candle(0, 105.0, 112.0, 99.0, 100.0, 100.0);
    let current = candle(1, 99.0, 108.0, 98.0, 107.0, 100.0);
    assert!(Engulfing.check(&[previous, current]).is_none());
  }

  #[test]
  fn test_engulfing_skips_zero_previous_body() {
    let previous = candle(0, 100.0, 101.0, 99.0, 100.0, 100.0);
    let current = candle(1, 98.0, 103.0, 97.0, 102.0, 100.0);
    assert!(Engulfing.check(&[previous, current]).is_none());
  }

  #[test]
  fn test_bullish_harami() {
    let previous = candle(0, 110.0, 111.0, 99.0, 100.0, 100.0);
    let current = candle(1, 103.0, 106.0, 102.0, 105.0, 100.0);
    let found = Harami.check(&[previous, current]).unwrap();

    assert_eq!(found.name, "Bullish Harami");
    assert!((found.confidence - 0.5).abs() < 1e-9);
  }

  #[test]
  fn test_harami_rejects_large_inner_body() {
    let previous = candle(0, 100.0, 111.0, 99.0, 110.0, 100.0);
    let current = candle(1, 108.0, 109.0, 101.0, 102.0, 100.0);
    assert!(Harami.check(&[previous, current]).is_none());
  }
}
