mod common;

use rstest::rstest;

use common::{candle, flat_candles, rising_candles, series, wavy_candles};
use ta_engine::analysis::{analyze_timeframes, CrossTimeframeAggregator, TimeframeAnalyzer};
use ta_engine::error::AnalysisError;
use ta_engine::market_data::Timeframe;
use ta_engine::models::{IndicatorResult, IndicatorSignal, PatternType, PriceActionSignal};
use ta_engine::patterns::detect_all;

#[test]
fn test_steady_uptrend() {
  let analysis = TimeframeAnalyzer::default().analyze("1day", &series(rising_candles(60))).unwrap();

  for key in ["MA_20", "MA_50", "EMA_20", "EMA_50", "VWAP"] {
    assert_eq!(analysis.indicators[key].signal(), IndicatorSignal::Bullish, "{}", key);
  }
  assert_eq!(analysis.indicators["RSI"].signal(), IndicatorSignal::Overbought);

  let total_patterns: usize = analysis.candlestick_patterns.values().map(|p| p.total_count).sum();
  assert_eq!(total_patterns, 0);

  let levels = analysis.support_resistance.unwrap();
  assert_eq!(levels.current_price, 159.0);
  assert!(matches!(
    levels.price_action_signal,
    PriceActionSignal::Neutral | PriceActionSignal::ApproachingResistance
  ));
}

#[test]
fn test_flat_market() {
  let analysis = TimeframeAnalyzer::default().analyze("1day", &series(flat_candles(60))).unwrap();

  let doji = &analysis.candlestick_patterns["Doji"];
  assert_eq!(doji.total_count, 60);
  assert!(doji.occurrences.iter().all(|p| p.pattern_type == PatternType::Neutral));

  match &analysis.indicators["BollingerBands"] {
    IndicatorResult::Bollinger(bands) => {
      assert_eq!(bands.current_upper, Some(100.0));
      assert_eq!(bands.current_middle, Some(100.0));
      assert_eq!(bands.current_lower, Some(100.0));
      assert_eq!(bands.signal, IndicatorSignal::Neutral);
    }
    other => panic!("unexpected result {:?}", other),
  }

  let levels = analysis.support_resistance.unwrap();
  assert!(levels.support_levels.is_empty() && levels.resistance_levels.is_empty());
  assert_eq!(levels.price_action_signal, PriceActionSignal::Neutral);
}

#[test]
fn test_two_candle_engulfing() {
  let candles = vec![
    candle(0, 105.0, 106.0, 99.0, 100.0, 1_000.0),
    candle(1, 99.0, 108.0, 98.0, 107.0, 1_500.0),
  ];
  let patterns = detect_all(&candles);

  let engulfing = &patterns["Engulfing"];
  assert_eq!(engulfing.total_count, 1);
  let hit = &engulfing.occurrences[0];
  assert_eq!(hit.name, "Bullish Engulfing");
  assert_eq!(hit.candle_index, 1);
  assert!((hit.confidence - 0.76).abs() < 1e-9);

  let others: usize = patterns.iter().filter(|(name, _)| *name != "Engulfing").map(|(_, p)| p.total_count).sum();
  assert_eq!(others, 0);
}

#[test]
fn test_summary_over_several_timeframes() {
  let inputs = vec![
    ("1day".to_string(), series(wavy_candles(120, 0.0))),
    ("1hour".to_string(), series(wavy_candles(90, 2.0))),
    ("15minute".to_string(), series(rising_candles(20))),
  ];
  let (results, summary) =
    analyze_timeframes(&TimeframeAnalyzer::default(), &CrossTimeframeAggregator::default(), &inputs).unwrap();

  assert_eq!(results.len(), 2);
  assert_eq!(summary.total_timeframes, 2);
  assert_eq!(summary.indicators_calculated.len(), 8);

  let signals = &summary.overall_signals;
  let total = signals.bullish_percentage + signals.bearish_percentage + signals.neutral_percentage;
  assert!((total - 100.0).abs() < 0.05, "percentages sum to {}", total);

  let levels = &summary.support_resistance_summary;
  assert_eq!(levels.price_action_signals.len(), 2);
  assert!(levels.recent_breaks.len() <= 5);
  assert!(levels.recent_breaks.windows(2).all(|w| w[0].level_break.significance >= w[1].level_break.significance));
}

#[test]
fn test_summary_ignores_input_order() {
  let a = ("1day".to_string(), series(wavy_candles(100, 0.0)));
  let b = ("1hour".to_string(), series(wavy_candles(100, 3.0)));
  let analyzer = TimeframeAnalyzer::default();
  let aggregator = CrossTimeframeAggregator::default();

  let (_, forward) = analyze_timeframes(&analyzer, &aggregator, &[a.clone(), b.clone()]).unwrap();
  let (_, backward) = analyze_timeframes(&analyzer, &aggregator, &[b, a]).unwrap();

  assert_eq!(forward, backward);
}

#[test]
fn test_every_timeframe_short() {
  let inputs = vec![("1day".to_string(), series(rising_candles(30)))];
  let err =
    analyze_timeframes(&TimeframeAnalyzer::default(), &CrossTimeframeAggregator::default(), &inputs).unwrap_err();

  assert!(matches!(err, AnalysisError::InsufficientData { got: 30, required: 50, .. }));
}

#[rstest]
#[case("1minute", Timeframe::Minute1)]
#[case("3minute", Timeframe::Minute3)]
#[case("5minute", Timeframe::Minute5)]
#[case("10minute", Timeframe::Minute10)]
#[case("15minute", Timeframe::Minute15)]
#[case("30minute", Timeframe::Minute30)]
#[case("1hour", Timeframe::Hour1)]
#[case("1day", Timeframe::Day1)]
#[case(" 1DAY ", Timeframe::Day1)]
fn test_timeframe_labels(#[case] label: &str, #[case] expected: Timeframe) {
  assert_eq!(label.parse::<Timeframe>().unwrap(), expected);
}

#[rstest]
#[case("2hour")]
#[case("1week")]
#[case("")]
fn test_unknown_timeframe(#[case] label: &str) {
  assert!(matches!(label.parse::<Timeframe>(), Err(AnalysisError::InvalidTimeframe(_))));
}
