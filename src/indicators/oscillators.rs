/**
* filename : oscillators
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::AnalysisError;
use crate::models::{CandleSeries, IndicatorResult, IndicatorSignal, RsiResult};
use super::utils::{fill_undefined, last_defined};
use super::Indicator;

/// Wilder RSI. 첫 평균은 단순 평균, 이후 Wilder 스무딩. `period` 인덱스부터 정의
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
  let mut out = vec![None; values.len()];
  if period == 0 || values.len() <= period {
    return out;
  }

  let mut gains = Vec::with_capacity(values.len() - 1);
  let mut losses = Vec::with_capacity(values.len() - 1);
  for pair in values.windows(2) {
    let change = pair[1] - pair[0];
    gains.push(if change > 0.0 { change } else { 0.0 });
    losses.push(if change < 0.0 { -change } else { 0.0 });
  }

  let p = period as f64;
  let mut avg_gain = gains[..period].iter().sum::<f64>() / p;
  let mut avg_loss = losses[..period].iter().sum::<f64>() / p;
  out[period] = Some(rsi_from_averages(avg_gain, avg_loss));

  // gains[i - 1]은 i번째 캔들의 변화량
  for i in (period + 1)..values.len() {
    avg_gain = (avg_gain * (p - 1.0) + gains[i - 1]) / p;
    avg_loss = (avg_loss * (p - 1.0) + losses[i - 1]) / p;
    out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
  }

  out
}

// RSI = 100 - (100 / (1 + RS))
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
  if avg_loss == 0.0 {
    // 하락이 전혀 없으면 100, 변화가 전혀 없으면 중립 50
    return if avg_gain == 0.0 { 50.0 } else { 100.0 };
  }

  let rs = avg_gain / avg_loss;
  100.0 - (100.0 / (1.0 + rs))
}

#[derive(Debug)]
pub struct RelativeStrengthIndex {
  period: usize,
  overbought_threshold: f64,
  oversold_threshold: f64,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize, overbought: Option<f64>, oversold: Option<f64>) -> Self {
    RelativeStrengthIndex {
      period,
      overbought_threshold: overbought.unwrap_or(70.0),
      oversold_threshold: oversold.unwrap_or(30.0),
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }

  pub fn signal_for(&self, value: Option<f64>) -> IndicatorSignal {
    match value {
      Some(v) if v > self.overbought_threshold => IndicatorSignal::Overbought,
      Some(v) if v < self.oversold_threshold => IndicatorSignal::Oversold,
      Some(v) if v > 50.0 => IndicatorSignal::Bullish,
      Some(_) => IndicatorSignal::Bearish,
      None => IndicatorSignal::Neutral,
    }
  }

  pub fn compute(&self, series: &CandleSeries) -> RsiResult {
    let values = rsi(&series.closes(), self.period);
    let current_value = last_defined(&values);

    RsiResult {
      name: "RSI".to_string(),
      values: fill_undefined(&values),
      current_value,
      signal: self.signal_for(current_value),
      period: self.period,
      overbought_level: self.overbought_threshold,
      oversold_level: self.oversold_threshold,
    }
  }
}

impl Indicator for RelativeStrengthIndex {
  fn key(&self) -> String {
    "RSI".to_string()
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    if self.period == 0 {
      return Err(AnalysisError::InvalidParameter("RSI period must be positive".to_string()));
    }
    if self.oversold_threshold >= self.overbought_threshold {
      return Err(AnalysisError::InvalidParameter(format!(
        "RSI oversold level {} must be below overbought level {}",
        self.oversold_threshold, self.overbought_threshold
      )));
    }
    Ok(IndicatorResult::Rsi(self.compute(series)))
  }
}
