/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 캔들 시리즈 전체를 다시 계산하는 무상태 지표 라이브러리
**/
pub mod moving_averages;
pub mod oscillators;
pub mod trend;
pub mod volatility;
pub mod volume;
pub mod utils;

pub use moving_averages::*;
pub use oscillators::*;
pub use trend::*;
pub use volatility::*;
pub use volume::*;
pub use utils::*;

use std::fmt::Debug;

use crate::error::AnalysisError;
use crate::models::{CandleSeries, IndicatorResult};

pub trait Indicator: Debug + Send + Sync {
  /// `TimeframeAnalysis.indicators`에 저장될 키 (예: "MA_20", "RSI")
  fn key(&self) -> String;

  // 시리즈 전체에 대해 지표를 계산
  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError>;
}

/// 설정값으로 기본 지표 세트 구성
pub fn default_indicator_set(config: &crate::config::AnalysisConfig) -> Vec<Box<dyn Indicator>> {
  let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();

  for period in &config.sma_periods {
    indicators.push(Box::new(SimpleMovingAverage::new(*period)));
  }
  for period in &config.ema_periods {
    indicators.push(Box::new(ExponentialMovingAverage::new(*period)));
  }
  indicators.push(Box::new(RelativeStrengthIndex::new(
    config.rsi_period,
    Some(config.rsi_overbought),
    Some(config.rsi_oversold),
  )));
  indicators.push(Box::new(Macd::new(config.macd_fast, config.macd_slow, config.macd_signal)));
  indicators.push(Box::new(BollingerBands::new(config.bollinger_period, config.bollinger_std)));
  indicators.push(Box::new(VolumeWeightedAveragePrice::new()));

  indicators
}
