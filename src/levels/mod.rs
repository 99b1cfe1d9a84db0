/**
* filename : mod
* author : HAMA
* date: 2025. 5. 12.
* description: 지지/저항 레벨 탐지 파이프라인
**/

pub mod clustering;
pub mod pivot;
pub mod price_action;
pub mod reducer;
pub mod volume_profile;

pub use clustering::ClusteringDetector;
pub use pivot::PivotDetector;
pub use price_action::{price_action_signal, recent_breaks};
pub use reducer::{merge_levels, nearest_resistance, nearest_support, rank_levels};
pub use volume_profile::VolumeProfileDetector;

use log::debug;

use crate::config::LevelConfig;
use crate::error::AnalysisError;
use crate::models::{Candle, CandleSeries, LevelType, SupportResistanceLevel, SupportResistanceResult};

/// 레벨 탐지 전략. 반환하는 레벨의 유형은 임시값이며 병합 단계에서 현재가 기준으로 다시 정해진다.
pub trait LevelDetector: Send + Sync {
  fn name(&self) -> &'static str;

  fn detect(&self, candles: &[Candle], current_price: f64) -> Vec<SupportResistanceLevel>;
}

/// 레벨 가격을 지나는 캔들 수와 마지막 터치 시각
pub(crate) fn touch_stats(candles: &[Candle], price: f64) -> (usize, Option<chrono::DateTime<chrono::Utc>>) {
  let mut count = 0;
  let mut last = None;
  for candle in candles.iter().filter(|c| c.touches(price)) {
    count += 1;
    last = Some(candle.timestamp);
  }
  (count, last)
}

pub struct SupportResistanceEngine {
  config: LevelConfig,
  detectors: Vec<Box<dyn LevelDetector>>,
}

impl SupportResistanceEngine {
  pub fn new(config: LevelConfig) -> Self {
    let detectors: Vec<Box<dyn LevelDetector>> = vec![
      Box::new(PivotDetector::new(config.pivot_window)),
      Box::new(ClusteringDetector::new(config.cluster_tolerance)),
      Box::new(VolumeProfileDetector::new(
        config.volume_bins,
        config.volume_threshold,
        config.volume_peak_radius,
      )),
    ];
    SupportResistanceEngine { config, detectors }
  }

  pub fn with_detectors(config: LevelConfig, detectors: Vec<Box<dyn LevelDetector>>) -> Self {
    SupportResistanceEngine { config, detectors }
  }

  pub fn analyze(&self, series: &CandleSeries) -> Result<SupportResistanceResult, AnalysisError> {
    let current_price = series
      .last()
      .map(|c| c.close)
      .ok_or_else(|| AnalysisError::InvalidData("cannot detect levels on an empty series".to_string()))?;
    if current_price <= 0.0 {
      return Err(AnalysisError::InvalidData(format!("current price must be positive, got {}", current_price)));
    }

    let candles = series.candles();
    let mut candidates = Vec::new();
    for detector in &self.detectors {
      let found = detector.detect(candles, current_price);
      debug!("{} 레벨 후보 {}개", detector.name(), found.len());
      candidates.extend(found);
    }

    let levels = merge_levels(candidates, current_price, self.config.merge_tolerance);
    debug!("병합 후 레벨 {}개 (현재가 {})", levels.len(), current_price);

    let support = nearest_support(&levels, current_price);
    let resistance = nearest_resistance(&levels, current_price);
    let signal = price_action_signal(candles, &levels, support.as_ref(), resistance.as_ref(), &self.config);
    let breaks = recent_breaks(candles, &levels, &self.config);

    Ok(SupportResistanceResult {
      support_levels: rank_levels(&levels, LevelType::Support, self.config.top_levels),
      resistance_levels: rank_levels(&levels, LevelType::Resistance, self.config.top_levels),
      nearest_support: support,
      nearest_resistance: resistance,
      current_price,
      price_action_signal: signal,
      recent_breaks: breaks,
    })
  }
}
