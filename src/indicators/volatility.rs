/**
* filename : volatility
* author : HAMA
* date: 2025. 5. 11.
* description: 볼린저 밴드
**/

use crate::error::AnalysisError;
use crate::models::{BollingerBandResult, CandleSeries, IndicatorResult, IndicatorSignal};
use crate::utils::math::sample_std_dev;
use super::moving_averages::sma;
use super::utils::{fill_undefined, last_defined, rolling};
use super::Indicator;

#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
  pub upper: Vec<Option<f64>>,
  pub middle: Vec<Option<f64>>,
  pub lower: Vec<Option<f64>>,
}

/// 중심선 = SMA(period), 상/하단 = 중심선 ± k * 표본 표준편차
pub fn bollinger(values: &[f64], period: usize, k: f64) -> BandSeries {
  let middle = sma(values, period);
  let deviation = rolling(values, period, sample_std_dev);

  let mut upper = vec![None; values.len()];
  let mut lower = vec![None; values.len()];
  for i in 0..values.len() {
    if let (Some(m), Some(d)) = (middle[i], deviation[i]) {
      upper[i] = Some(m + k * d);
      lower[i] = Some(m - k * d);
    }
  }

  BandSeries { upper, middle, lower }
}

#[derive(Debug)]
pub struct BollingerBands {
  period: usize,
  std_multiplier: f64,
}

impl BollingerBands {
  pub fn new(period: usize, std_multiplier: f64) -> Self {
    BollingerBands {
      period,
      std_multiplier,
    }
  }

  pub fn compute(&self, series: &CandleSeries) -> BollingerBandResult {
    let bands = bollinger(&series.closes(), self.period, self.std_multiplier);

    let current_upper = last_defined(&bands.upper);
    let current_middle = last_defined(&bands.middle);
    let current_lower = last_defined(&bands.lower);
    let current_price = series.last().map(|c| c.close);

    let signal = match (current_price, current_upper, current_lower) {
      (Some(price), Some(upper), Some(_)) if price > upper => IndicatorSignal::Overbought,
      (Some(price), Some(_), Some(lower)) if price < lower => IndicatorSignal::Oversold,
      _ => IndicatorSignal::Neutral,
    };

    BollingerBandResult {
      name: "Bollinger Bands".to_string(),
      upper_band: fill_undefined(&bands.upper),
      middle_band: fill_undefined(&bands.middle),
      lower_band: fill_undefined(&bands.lower),
      current_upper,
      current_middle,
      current_lower,
      current_price,
      signal,
    }
  }
}

impl Indicator for BollingerBands {
  fn key(&self) -> String {
    "BollingerBands".to_string()
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    if self.period < 2 {
      return Err(AnalysisError::InvalidParameter("Bollinger period must be at least 2".to_string()));
    }
    if self.std_multiplier < 0.0 {
      return Err(AnalysisError::InvalidParameter("Bollinger multiplier must be non-negative".to_string()));
    }
    Ok(IndicatorResult::Bollinger(self.compute(series)))
  }
}
