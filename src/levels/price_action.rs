/**
* filename : price_action
* author : HAMA
* date: 2025. 5. 12.
* description: 가격 행동 신호와 최근 레벨 돌파
**/

use crate::config::LevelConfig;
use crate::models::{BreakType, Candle, LevelBreak, PriceActionSignal, SupportResistanceLevel};
use crate::utils::math::{desc, distance_pct, percent_change};

/// 현재 가격 행동 분류.
///
/// `change_lookback` 캔들 전 종가가 주요 레벨(강도 >= major_strength)의 반대편에 있었고
/// 현재 종가가 그 레벨을 넘어 `proximity_pct` 이내에 있으면 BREAKOUT / BREAKDOWN.
/// 그 외에는 하락 중 지지선 근접, 상승 중 저항선 근접 여부로 판정한다.
pub fn price_action_signal(
  candles: &[Candle],
  levels: &[SupportResistanceLevel],
  nearest_support: Option<&SupportResistanceLevel>,
  nearest_resistance: Option<&SupportResistanceLevel>,
  config: &LevelConfig,
) -> PriceActionSignal {
  let lookback = config.change_lookback;
  if lookback == 0 || candles.len() <= lookback {
    return PriceActionSignal::Neutral;
  }

  let current = candles[candles.len() - 1].close;
  let past = candles[candles.len() - 1 - lookback].close;
  let change = percent_change(past, current);

  let major = levels.iter().filter(|l| l.strength >= config.major_strength);
  for level in major {
    let within = distance_pct(current, level.price) <= config.proximity_pct;
    if past < level.price && current > level.price && within {
      return PriceActionSignal::Breakout;
    }
    if past > level.price && current < level.price && within {
      return PriceActionSignal::Breakdown;
    }
  }

  let near = |level: Option<&SupportResistanceLevel>| {
    level.map(|l| distance_pct(l.price, current) <= config.proximity_pct).unwrap_or(false)
  };

  if change < 0.0 && near(nearest_support) {
    PriceActionSignal::ApproachingSupport
  } else if change > 0.0 && near(nearest_resistance) {
    PriceActionSignal::ApproachingResistance
  } else {
    PriceActionSignal::Neutral
  }
}

/// 최근 `break_lookback` 캔들 안에서 종가가 강한 레벨을 가로지른 지점.
/// 유의도 = 강도 * (1 + 관통 %), 유의도 내림차순(같으면 최근 캔들 우선) 상위 `max_breaks`개
pub fn recent_breaks(candles: &[Candle], levels: &[SupportResistanceLevel], config: &LevelConfig) -> Vec<LevelBreak> {
  let mut breaks = Vec::new();
  if candles.len() < 2 {
    return breaks;
  }

  let start = candles.len().saturating_sub(config.break_lookback).max(1);
  let strong: Vec<&SupportResistanceLevel> =
    levels.iter().filter(|l| l.strength >= config.break_min_strength).collect();

  for i in start..candles.len() {
    let previous = candles[i - 1].close;
    let candle = &candles[i];

    for level in &strong {
      let break_type = if previous <= level.price && candle.close > level.price {
        BreakType::Breakout
      } else if previous >= level.price && candle.close < level.price {
        BreakType::Breakdown
      } else {
        continue;
      };

      let penetration = distance_pct(candle.close, level.price);
      breaks.push(LevelBreak {
        level_price: level.price,
        break_type,
        timestamp: candle.timestamp,
        candle_index: i,
        close_price: candle.close,
        level_strength: level.strength,
        significance: level.strength * (1.0 + penetration),
      });
    }
  }

  breaks.sort_by(|a, b| desc(a.significance, b.significance).then_with(|| b.candle_index.cmp(&a.candle_index)));
  breaks.truncate(config.max_breaks);
  breaks
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::LevelType;
  use crate::test_support::candle;

  fn closes(values: &[f64]) -> Vec<Candle> {
    values
      .iter()
      .enumerate()
      .map(|(i, &c)| candle(i as i64, c, c + 0.2, c - 0.2, c, 100.0))
      .collect()
  }

  fn level(price: f64, strength: f64, current: f64) -> SupportResistanceLevel {
    SupportResistanceLevel::provisional(price, LevelType::relative_to(price, current), strength, 1)
  }

  #[test]
  fn test_breakout_through_major_level() {
    let candles = closes(&[98.0, 98.5, 99.0, 99.5, 99.8, 100.5, 101.0]);
    let levels = vec![level(100.0, 9.0, 101.0)];

    let signal = price_action_signal(&candles, &levels, None, None, &LevelConfig::default());
    assert_eq!(signal, PriceActionSignal::Breakout);
  }

  #[test]
  fn test_minor_level_is_only_approached() {
    let candles = closes(&[104.0, 103.5, 103.0, 102.5, 102.0, 101.5, 101.0]);
    let levels = vec![level(100.0, 4.0, 101.0)];

    let signal = price_action_signal(&candles, &levels, levels.first(), None, &LevelConfig::default());
    assert_eq!(signal, PriceActionSignal::ApproachingSupport);
  }

  #[test]
  fn test_breakdown_through_major_level() {
    let candles = closes(&[103.0, 102.0, 101.5, 101.0, 100.5, 99.5, 99.0]);
    let levels = vec![level(100.0, 8.0, 99.0)];

    let signal = price_action_signal(&candles, &levels, None, levels.first(), &LevelConfig::default());
    assert_eq!(signal, PriceActionSignal::Breakdown);
  }

  #[test]
  fn test_short_series_is_neutral() {
    let candles = closes(&[100.0, 101.0]);
    assert_eq!(
      price_action_signal(&candles, &[], None, None, &LevelConfig::default()),
      PriceActionSignal::Neutral
    );
  }

  #[test]
  fn test_recent_breaks_sorted_and_capped() {
    let candles = closes(&[95.0, 101.0, 99.0, 103.0, 96.0, 104.0]);
    let levels = vec![level(100.0, 6.0, 104.0), level(97.0, 9.0, 104.0), level(102.0, 3.0, 104.0)];
    let breaks = recent_breaks(&candles, &levels, &LevelConfig::default());

    assert_eq!(breaks.len(), 3);
    assert!(breaks.windows(2).all(|w| w[0].significance >= w[1].significance));
    assert!(breaks.iter().all(|b| b.level_strength >= 5.0));
    assert_eq!(breaks[0].level_price, 97.0);
  }
}
