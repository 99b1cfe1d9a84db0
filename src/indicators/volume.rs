/**
* filename : volume
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::AnalysisError;
use crate::models::{Candle, CandleSeries, IndicatorResult, VwapResult};
use super::utils::{fill_undefined, last_defined, price_vs_value_signal};
use super::Indicator;

/// 누적 VWAP = Σ(typical price × volume) / Σ volume
///
/// 세션 리셋은 하지 않는다. 누적 거래량이 0인 구간은 미정의.
pub fn vwap(candles: &[Candle]) -> Vec<Option<f64>> {
  let mut cumulative_pv = 0.0;
  let mut cumulative_volume = 0.0;

  candles
    .iter()
    .map(|candle| {
      cumulative_pv += candle.typical_price() * candle.volume;
      cumulative_volume += candle.volume;

      if cumulative_volume > 0.0 {
        Some(cumulative_pv / cumulative_volume)
      } else {
        None
      }
    })
    .collect()
}

#[derive(Debug, Default)]
pub struct VolumeWeightedAveragePrice;

impl VolumeWeightedAveragePrice {
  pub fn new() -> Self {
    VolumeWeightedAveragePrice
  }

  pub fn compute(&self, series: &CandleSeries) -> VwapResult {
    let values = vwap(series.candles());
    let current_value = last_defined(&values);
    let current_price = series.last().map(|c| c.close);

    VwapResult {
      name: "VWAP".to_string(),
      values: fill_undefined(&values),
      current_value,
      signal: price_vs_value_signal(current_price, current_value),
    }
  }
}

impl Indicator for VolumeWeightedAveragePrice {
  fn key(&self) -> String {
    "VWAP".to_string()
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    Ok(IndicatorResult::Vwap(self.compute(series)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::IndicatorSignal;
  use crate::test_support::candle;

  #[test]
  fn test_cumulative_vwap() {
    let candles = vec![
      candle(0, 100.0, 103.0, 97.0, 100.0, 10.0),
      candle(1, 100.0, 106.0, 100.0, 103.0, 30.0),
    ];
    let values = vwap(&candles);

    // typical: 100, 103 -> (1000 + 3090) / 40
    assert_eq!(values[0], Some(100.0));
    assert!((values[1].unwrap() - 102.25).abs() < 1e-9);
  }

  #[test]
  fn test_zero_volume_prefix_is_undefined() {
    let candles = vec![
      candle(0, 100.0, 101.0, 99.0, 100.0, 0.0),
      candle(1, 100.0, 101.0, 99.0, 100.0, 5.0),
    ];
    let values = vwap(&candles);

    assert_eq!(values[0], None);
    assert_eq!(values[1], Some(100.0));
  }

  #[test]
  fn test_vwap_signal() {
    let series = CandleSeries::new(vec![
      candle(0, 100.0, 101.0, 99.0, 100.0, 50.0),
      candle(1, 100.0, 111.0, 99.0, 110.0, 5.0),
    ])
    .unwrap();
    let result = VolumeWeightedAveragePrice::new().compute(&series);

    assert_eq!(result.signal, IndicatorSignal::Bullish);
    assert_eq!(result.values.len(), 2);
  }
}
