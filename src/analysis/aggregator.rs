/**
* filename : aggregator
* author : HAMA
* date: 2025. 5. 13.
* description: 타임프레임 간 요약
**/

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::AnalysisConfig;
use crate::models::{
  AnalysisSummary, IndicatorSignal, LevelType, OverallSignals, PatternRollup, PatternType,
  SupportResistanceSummary, TimeframeAnalysis, TimeframeBreak, TimeframeLevel,
};
use crate::utils::math::desc;

/// N개의 `TimeframeAnalysis`를 하나의 요약으로 접는다.
///
/// 입력은 먼저 타임프레임 라벨 순으로 정렬되고 모든 선택에 결정적 타이브레이크가 있어
/// 도착 순서가 결과에 영향을 주지 않는다.
#[derive(Debug, Clone)]
pub struct CrossTimeframeAggregator {
  max_breaks: usize,
}

impl Default for CrossTimeframeAggregator {
  fn default() -> Self {
    Self::from_config(&AnalysisConfig::default())
  }
}

impl CrossTimeframeAggregator {
  pub fn new(max_breaks: usize) -> Self {
    CrossTimeframeAggregator { max_breaks }
  }

  pub fn from_config(config: &AnalysisConfig) -> Self {
    Self::new(config.summary_max_breaks)
  }

  pub fn aggregate(&self, results: &[TimeframeAnalysis]) -> AnalysisSummary {
    let mut ordered: Vec<&TimeframeAnalysis> = results.iter().collect();
    ordered.sort_by(|a, b| a.timeframe.cmp(&b.timeframe));

    let indicators_calculated: BTreeSet<String> =
      ordered.iter().flat_map(|r| r.indicators.keys().cloned()).collect();

    AnalysisSummary {
      total_timeframes: ordered.len(),
      indicators_calculated: indicators_calculated.into_iter().collect(),
      overall_signals: overall_signals(&ordered),
      pattern_summary: pattern_summary(&ordered),
      support_resistance_summary: self.support_resistance_summary(&ordered),
    }
  }

  fn support_resistance_summary(&self, results: &[&TimeframeAnalysis]) -> SupportResistanceSummary {
    let mut summary = SupportResistanceSummary::default();
    let mut breaks = Vec::new();

    for result in results {
      let Some(sr) = &result.support_resistance else {
        continue;
      };

      summary.total_support_levels += sr.support_levels.len();
      summary.total_resistance_levels += sr.resistance_levels.len();
      summary.price_action_signals.insert(result.timeframe.clone(), sr.price_action_signal);

      for level in sr.support_levels.iter().chain(sr.resistance_levels.iter()) {
        let candidate = TimeframeLevel {
          timeframe: result.timeframe.clone(),
          level: level.clone(),
        };
        let slot = match level.level_type {
          LevelType::Support => &mut summary.strongest_support,
          LevelType::Resistance => &mut summary.strongest_resistance,
        };
        let replace = slot
          .as_ref()
          .map(|current| level_order(&candidate, current) == Ordering::Less)
          .unwrap_or(true);
        if replace {
          *slot = Some(candidate);
        }
      }

      breaks.extend(sr.recent_breaks.iter().map(|b| TimeframeBreak {
        timeframe: result.timeframe.clone(),
        level_break: b.clone(),
      }));
    }

    breaks.sort_by(|a, b| {
      desc(a.level_break.significance, b.level_break.significance)
        .then_with(|| b.level_break.timestamp.cmp(&a.level_break.timestamp))
        .then_with(|| a.timeframe.cmp(&b.timeframe))
        .then_with(|| a.level_break.level_price.total_cmp(&b.level_break.level_price))
    });
    breaks.truncate(self.max_breaks);
    summary.recent_breaks = breaks;

    summary
  }
}

// 강도 내림차순, 가격 오름차순, 라벨 오름차순
fn level_order(a: &TimeframeLevel, b: &TimeframeLevel) -> Ordering {
  desc(a.level.strength, b.level.strength)
    .then_with(|| a.level.price.total_cmp(&b.level.price))
    .then_with(|| a.timeframe.cmp(&b.timeframe))
}

/// BULLISH/BEARISH만 각각 집계하고 나머지(과매수/과매도 포함)는 중립으로 본다.
pub fn overall_signals(results: &[&TimeframeAnalysis]) -> OverallSignals {
  let mut bullish = 0u32;
  let mut bearish = 0u32;
  let mut neutral = 0u32;

  for result in results {
    for indicator in result.indicators.values() {
      match indicator.signal() {
        IndicatorSignal::Bullish => bullish += 1,
        IndicatorSignal::Bearish => bearish += 1,
        _ => neutral += 1,
      }
    }
  }

  let total = bullish + bearish + neutral;
  if total == 0 {
    return OverallSignals::default();
  }

  let pct = |count: u32| -> f64 {
    (Decimal::from(count) * dec!(100) / Decimal::from(total))
      .round_dp(2)
      .to_f64()
      .unwrap_or(0.0)
  };

  OverallSignals {
    bullish_percentage: pct(bullish),
    bearish_percentage: pct(bearish),
    neutral_percentage: pct(neutral),
  }
}

/// 발생이 한 건 이상인 패턴 계열만 포함
pub fn pattern_summary(results: &[&TimeframeAnalysis]) -> BTreeMap<String, PatternRollup> {
  let mut summary: BTreeMap<String, PatternRollup> = BTreeMap::new();

  for result in results {
    for (family, patterns) in &result.candlestick_patterns {
      if patterns.total_count == 0 {
        continue;
      }

      let rollup = summary.entry(family.clone()).or_default();
      rollup.total_occurrences += patterns.total_count;
      rollup.bullish_count += patterns.count_of(PatternType::Bullish);
      rollup.bearish_count += patterns.count_of(PatternType::Bearish);
      rollup.neutral_count += patterns.count_of(PatternType::Neutral);
      if !rollup.timeframes.contains(&result.timeframe) {
        rollup.timeframes.push(result.timeframe.clone());
      }
      rollup.most_recent = rollup.most_recent.max(patterns.last_occurrence);
    }
  }

  summary
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{
    BreakType, IndicatorResult, LevelBreak, MaResult, MaType, PatternResult, PriceActionSignal,
    SupportResistanceLevel, SupportResistanceResult,
  };
  use crate::patterns::{CandlePattern, Doji};
  use crate::test_support::{candle, day};

  fn ma(signal: IndicatorSignal) -> IndicatorResult {
    IndicatorResult::MovingAverage(MaResult {
      name: "SMA_20".to_string(),
      values: vec![],
      current_value: Some(1.0),
      signal,
      period: 20,
      ma_type: MaType::Sma,
    })
  }

  fn level(price: f64, level_type: LevelType, strength: f64) -> SupportResistanceLevel {
    SupportResistanceLevel::provisional(price, level_type, strength, 1)
  }

  fn analysis(timeframe: &str, signals: &[IndicatorSignal], support_strength: f64) -> TimeframeAnalysis {
    let mut result = TimeframeAnalysis::new(timeframe, 60);
    for (i, signal) in signals.iter().enumerate() {
      result.add_indicator(format!("IND_{}", i), ma(*signal));
    }

    let doji_candles: Vec<_> = (0..3).map(|i| candle(i, 10.0, 10.0, 10.0, 10.0, 1.0)).collect();
    result.candlestick_patterns.insert("Doji".to_string(), Doji.scan(&doji_candles));
    result.candlestick_patterns.insert("Hammer".to_string(), PatternResult::new("Hammer", vec![]));

    result.support_resistance = Some(SupportResistanceResult {
      support_levels: vec![level(95.0, LevelType::Support, support_strength)],
      resistance_levels: vec![level(105.0, LevelType::Resistance, 7.0)],
      nearest_support: None,
      nearest_resistance: None,
      current_price: 100.0,
      price_action_signal: PriceActionSignal::Neutral,
      recent_breaks: vec![LevelBreak {
        level_price: 95.0,
        break_type: BreakType::Breakout,
        timestamp: day(2),
        candle_index: 2,
        close_price: 96.0,
        level_strength: support_strength,
        significance: support_strength * 2.0,
      }],
    });
    result
  }

  #[test]
  fn test_signal_percentages() {
    use IndicatorSignal::*;
    let results = vec![
      analysis("1day", &[Bullish, Bullish, Bearish], 6.0),
      analysis("1hour", &[Overbought, Neutral, Oversold], 6.0),
    ];
    let summary = CrossTimeframeAggregator::default().aggregate(&results);

    assert_eq!(summary.total_timeframes, 2);
    assert!((summary.overall_signals.bullish_percentage - 33.33).abs() < 1e-9);
    assert!((summary.overall_signals.bearish_percentage - 16.67).abs() < 1e-9);
    assert!((summary.overall_signals.neutral_percentage - 50.0).abs() < 1e-9);
    assert_eq!(summary.indicators_calculated, vec!["IND_0", "IND_1", "IND_2"]);
  }

  #[test]
  fn test_pattern_rollup() {
    let results = vec![analysis("1day", &[], 6.0), analysis("1hour", &[], 6.0)];
    let summary = CrossTimeframeAggregator::default().aggregate(&results);

    assert!(!summary.pattern_summary.contains_key("Hammer"));
    let doji = &summary.pattern_summary["Doji"];
    assert_eq!(doji.total_occurrences, 6);
    assert_eq!(doji.neutral_count, 6);
    assert_eq!(doji.timeframes, vec!["1day", "1hour"]);
    assert_eq!(doji.most_recent, Some(day(2)));
  }

  #[test]
  fn test_strongest_levels_and_breaks() {
    let results = vec![
      analysis("1day", &[], 6.0),
      analysis("1hour", &[], 9.0),
      analysis("15minute", &[], 9.0),
    ];
    let summary = CrossTimeframeAggregator::default().aggregate(&results).support_resistance_summary;

    assert_eq!(summary.total_support_levels, 3);
    assert_eq!(summary.total_resistance_levels, 3);
    // 강도와 가격이 같으면 라벨 순
    assert_eq!(summary.strongest_support.as_ref().unwrap().timeframe, "15minute");
    assert_eq!(summary.strongest_resistance.as_ref().unwrap().level.strength, 7.0);
    assert_eq!(summary.recent_breaks.len(), 3);
    assert_eq!(summary.recent_breaks[0].timeframe, "15minute");
    assert_eq!(summary.price_action_signals.len(), 3);
  }

  #[test]
  fn test_merge_order_does_not_matter() {
    use IndicatorSignal::*;
    let a = analysis("1day", &[Bullish, Bearish], 6.0);
    let b = analysis("1hour", &[Neutral], 8.0);
    let c = analysis("5minute", &[Bullish], 8.0);

    let aggregator = CrossTimeframeAggregator::default();
    let forward = aggregator.aggregate(&[a.clone(), b.clone(), c.clone()]);
    let backward = aggregator.aggregate(&[c, a, b]);

    assert_eq!(forward, backward);
  }

  #[test]
  fn test_break_limit_from_config() {
    let results: Vec<TimeframeAnalysis> = ["15minute", "1day", "1hour", "30minute", "5minute", "minute"]
      .iter()
      .map(|tf| analysis(tf, &[], 6.0))
      .collect();

    let summary = CrossTimeframeAggregator::default().aggregate(&results);
    assert_eq!(summary.support_resistance_summary.recent_breaks.len(), 5);

    let config = AnalysisConfig {
      summary_max_breaks: 2,
      ..AnalysisConfig::default()
    };
    let summary = CrossTimeframeAggregator::from_config(&config).aggregate(&results);
    assert_eq!(summary.support_resistance_summary.recent_breaks.len(), 2);
  }

  #[test]
  fn test_empty_input() {
    let summary = CrossTimeframeAggregator::default().aggregate(&[]);
    assert_eq!(summary.total_timeframes, 0);
    assert_eq!(summary.overall_signals, OverallSignals::default());
  }
}
