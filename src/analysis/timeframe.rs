/**
* filename : timeframe
* author : HAMA
* date: 2025. 5. 13.
* description: 단일 타임프레임 분석기
**/

use log::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::{default_indicator_set, Indicator};
use crate::levels::SupportResistanceEngine;
use crate::models::{CandleSeries, TimeframeAnalysis};
use crate::patterns::PatternDetector;

/// 지표 라이브러리, 패턴 탐지기, 지지/저항 엔진을 한 타임프레임에 대해 실행한다.
///
/// 내부 상태는 생성 후 바뀌지 않으므로 여러 작업자가 `Arc`로 공유해도 된다.
pub struct TimeframeAnalyzer {
  min_candles: usize,
  indicators: Vec<Box<dyn Indicator>>,
  patterns: PatternDetector,
  levels: SupportResistanceEngine,
}

impl TimeframeAnalyzer {
  pub fn new(config: &AnalysisConfig) -> Self {
    TimeframeAnalyzer {
      min_candles: config.min_candles,
      indicators: default_indicator_set(config),
      patterns: PatternDetector::new(),
      levels: SupportResistanceEngine::new(config.levels.clone()),
    }
  }

  pub fn analyze(&self, timeframe: &str, series: &CandleSeries) -> Result<TimeframeAnalysis, AnalysisError> {
    series.ensure_min_len(timeframe, self.min_candles)?;

    let mut analysis = TimeframeAnalysis::new(timeframe, series.len());

    for indicator in &self.indicators {
      let result = indicator.calculate(series)?;
      analysis.add_indicator(indicator.key(), result);
    }

    analysis.candlestick_patterns = self.patterns.detect_all(series.candles());
    analysis.support_resistance = Some(self.levels.analyze(series)?);

    debug!(
      "{} 분석 완료: 캔들 {}개, 지표 {}개, 패턴 {}건",
      timeframe,
      series.len(),
      analysis.indicators.len(),
      analysis.candlestick_patterns.values().map(|p| p.total_count).sum::<usize>()
    );

    Ok(analysis)
  }
}

impl Default for TimeframeAnalyzer {
  fn default() -> Self {
    Self::new(&AnalysisConfig::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{IndicatorSignal, PatternType};
  use crate::test_support::series_from_closes;

  #[test]
  fn test_rejects_short_series() {
    let series = series_from_closes(&vec![100.0; 49]);
    let err = TimeframeAnalyzer::default().analyze("1day", &series).unwrap_err();

    assert!(matches!(err, AnalysisError::InsufficientData { got: 49, required: 50, .. }));
  }

  #[test]
  fn test_indicator_keys() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 / 3.0).sin() * 4.0).collect();
    let analysis = TimeframeAnalyzer::default().analyze("1hour", &series_from_closes(&closes)).unwrap();

    let keys: Vec<&str> = analysis.indicators.keys().map(|k| k.as_str()).collect();
    assert_eq!(
      keys,
      vec!["BollingerBands", "EMA_20", "EMA_50", "MACD", "MA_20", "MA_50", "RSI", "VWAP"]
    );
    assert_eq!(analysis.timeframe, "1hour");
    assert_eq!(analysis.data_points, 60);
    assert_eq!(analysis.candlestick_patterns.len(), 6);
    assert!(analysis.support_resistance.is_some());
  }

  #[test]
  fn test_rising_series_is_bullish() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let analysis = TimeframeAnalyzer::default().analyze("1day", &series_from_closes(&closes)).unwrap();

    for key in ["MA_20", "MA_50", "EMA_20", "EMA_50", "VWAP"] {
      assert_eq!(analysis.indicators[key].signal(), IndicatorSignal::Bullish, "{}", key);
    }
    assert_eq!(analysis.indicators["RSI"].signal(), IndicatorSignal::Overbought);

    let bearish: usize = analysis.candlestick_patterns.values().map(|p| p.count_of(PatternType::Bearish)).sum();
    assert_eq!(bearish, 0);
  }
}
