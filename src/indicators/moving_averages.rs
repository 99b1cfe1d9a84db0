/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::AnalysisError;
use crate::models::{CandleSeries, IndicatorResult, MaResult, MaType};
use super::utils::{fill_undefined, last_defined, price_vs_value_signal, rolling};
use super::Indicator;

/// 단순 이동평균. 앞의 `period - 1`개는 미정의
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
  rolling(values, period, |window| Some(window.iter().sum::<f64>() / window.len() as f64))
}

/// 지수 이동평균. 첫 값은 SMA(period)로 시드
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
  let mut out = vec![None; values.len()];
  if period == 0 || values.len() < period {
    return out;
  }

  let alpha = 2.0 / (period as f64 + 1.0);
  let seed = values[..period].iter().sum::<f64>() / period as f64;
  out[period - 1] = Some(seed);

  let mut prev = seed;
  for i in period..values.len() {
    prev = values[i] * alpha + prev * (1.0 - alpha);
    out[i] = Some(prev);
  }

  out
}

/// 부분적으로 정의된 시리즈의 EMA (MACD 시그널 라인용)
///
/// 정의된 구간은 연속이라고 가정하고, 첫 정의 지점부터 EMA를 계산한다.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
  let mut out = vec![None; values.len()];
  let start = match values.iter().position(|v| v.is_some()) {
    Some(start) => start,
    None => return out,
  };

  let defined: Vec<f64> = values[start..].iter().map_while(|v| *v).collect();
  for (offset, value) in ema(&defined, period).into_iter().enumerate() {
    out[start + offset] = value;
  }

  out
}

#[derive(Debug)]
pub struct SimpleMovingAverage {
  period: usize,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage { period }
  }

  pub fn compute(&self, series: &CandleSeries) -> MaResult {
    moving_average_result(series, self.period, MaType::Sma, sma(&series.closes(), self.period))
  }
}

impl Indicator for SimpleMovingAverage {
  fn key(&self) -> String {
    format!("MA_{}", self.period)
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    if self.period == 0 {
      return Err(AnalysisError::InvalidParameter("SMA period must be positive".to_string()));
    }
    Ok(IndicatorResult::MovingAverage(self.compute(series)))
  }
}

#[derive(Debug)]
pub struct ExponentialMovingAverage {
  period: usize,
}

impl ExponentialMovingAverage {
  pub fn new(period: usize) -> Self {
    ExponentialMovingAverage { period }
  }

  pub fn compute(&self, series: &CandleSeries) -> MaResult {
    moving_average_result(series, self.period, MaType::Ema, ema(&series.closes(), self.period))
  }
}

impl Indicator for ExponentialMovingAverage {
  fn key(&self) -> String {
    format!("EMA_{}", self.period)
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    if self.period == 0 {
      return Err(AnalysisError::InvalidParameter("EMA period must be positive".to_string()));
    }
    Ok(IndicatorResult::MovingAverage(self.compute(series)))
  }
}

fn moving_average_result(
  series: &CandleSeries,
  period: usize,
  ma_type: MaType,
  values: Vec<Option<f64>>,
) -> MaResult {
  let current_value = last_defined(&values);
  let current_price = series.last().map(|c| c.close);
  let prefix = match ma_type {
    MaType::Sma => "SMA",
    MaType::Ema => "EMA",
  };

  MaResult {
    name: format!("{}_{}", prefix, period),
    values: fill_undefined(&values),
    current_value,
    signal: price_vs_value_signal(current_price, current_value),
    period,
    ma_type,
  }
}
