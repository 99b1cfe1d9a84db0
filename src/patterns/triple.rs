/**
* filename : triple
* author : HAMA
* date: 2025. 5. 11.
* description: 삼중 캔들 패턴 (Morning Star)
**/

use crate::models::{Candle, PatternType};
use super::{has_range, CandlePattern, PatternMatch};

/// 장대 음봉 -> 작은 몸통(스타) -> 첫 캔들 몸통 중앙 위에서 마감하는 양봉
#[derive(Debug, Clone, Copy, Default)]
pub struct MorningStar;

impl MorningStar {
  fn gap_bonus(first: &Candle, star: &Candle, last: &Candle) -> Option<f64> {
    let gap_down = star.body_top() < first.body_bottom();
    let gap_up = last.body_bottom() > star.body_top();

    match (gap_down, gap_up) {
      (true, true) => Some(0.1),
      (true, false) | (false, true) => Some(0.05),
      (false, false) => None,
    }
  }
}

impl CandlePattern for MorningStar {
  fn family(&self) -> &'static str {
    "Morning Star"
  }

  fn window(&self) -> usize {
    3
  }

  fn check(&self, window: &[Candle]) -> Option<PatternMatch> {
    let [first, star, last] = window else {
      return None;
    };
    if !has_range(window) || !first.is_bearish() || !last.is_bullish() {
      return None;
    }

    let star_ratio = star.body() / first.body();
    if star_ratio >= 0.5 {
      return None;
    }

    let gap_bonus = Self::gap_bonus(first, star, last)?;

    let midpoint = (first.open + first.close) / 2.0;
    if last.close <= midpoint {
      return None;
    }

    Some(PatternMatch::new(
      "Morning Star",
      PatternType::Bullish,
      0.6 + gap_bonus + 0.2 * (1.0 - star_ratio),
      "Bearish candle, small star and a strong bullish close, bullish reversal",
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::candle;

  #[test]
  fn test_morning_star_with_both_gaps() {
    let first = candle(0, 110.0, 111.0, 99.0, 100.0, 100.0);
    let star = candle(1, 98.0, 99.0, 96.0, 97.0, 100.0);
    let last = candle(2, 99.0, 108.0, 98.5, 107.0, 100.0);
    let found = MorningStar.check(&[first, star, last]).unwrap();

    assert_eq!(found.pattern_type, PatternType::Bullish);
    // 0.6 + 0.1 + 0.2 * 0.9
    assert!((found.confidence - 0.88).abs() < 1e-9);
  }

  #[test]
  fn test_morning_star_single_gap() {
    let first = candle(0, 110.0, 111.0, 99.0, 100.0, 100.0);
    let star = candle(1, 99.0, 100.0, 96.0, 97.0, 100.0);
    let last = candle(2, 98.0, 108.0, 97.5, 107.0, 100.0);
    let found = MorningStar.check(&[first, star, last]).unwrap();

    // 스타 몸통 99 < 첫 몸통 하단 100 -> 하방 갭만 인정
    assert!((found.confidence - (0.6 + 0.05 + 0.2 * 0.8)).abs() < 1e-9);
  }

  #[test]
  fn test_morning_star_requires_close_above_midpoint() {
    let first = candle(0, 110.0, 111.0, 99.0, 100.0, 100.0);
    let star = candle(1, 98.0, 99.0, 96.0, 97.0, 100.0);
    let last = candle(2, 99.0, 105.5, 98.5, 104.0, 100.0);
    assert!(MorningStar.check(&[first, star, last]).is_none());
  }

  #[test]
  fn test_morning_star_requires_small_star() {
    let first = candle(0, 110.0, 111.0, 99.0, 100.0, 100.0);
    let star = candle(1, 99.0, 100.0, 91.0, 92.0, 100.0);
    let last = candle(2, 93.0, 108.0, 92.5, 107.0, 100.0);
    assert!(MorningStar.check(&[first, star, last]).is_none());
  }
}
