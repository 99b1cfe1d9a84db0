/**
* filename : trend
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::AnalysisError;
use crate::models::{CandleSeries, IndicatorResult, IndicatorSignal, MacdResult};
use super::moving_averages::{ema, ema_of_defined};
use super::utils::{fill_undefined, last_defined};
use super::Indicator;

/// MACD 계산 결과 (미정의 구간은 None)
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
  pub macd_line: Vec<Option<f64>>,
  pub signal_line: Vec<Option<f64>>,
  pub histogram: Vec<Option<f64>>,
}

/// MACD 라인 = EMA(fast) - EMA(slow), 시그널 = MACD 라인의 EMA(signal), 히스토그램 = 차이
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
  let fast_ema = ema(values, fast);
  let slow_ema = ema(values, slow);

  let macd_line: Vec<Option<f64>> = fast_ema
    .iter()
    .zip(slow_ema.iter())
    .map(|(f, s)| match (f, s) {
      (Some(f), Some(s)) => Some(f - s),
      _ => None,
    })
    .collect();

  let signal_line = ema_of_defined(&macd_line, signal);

  let histogram = macd_line
    .iter()
    .zip(signal_line.iter())
    .map(|(m, s)| match (m, s) {
      (Some(m), Some(s)) => Some(m - s),
      _ => None,
    })
    .collect();

  MacdSeries {
    macd_line,
    signal_line,
    histogram,
  }
}

#[derive(Debug)]
pub struct Macd {
  fast_period: usize,
  slow_period: usize,
  signal_period: usize,
}

impl Macd {
  pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
    Macd {
      fast_period,
      slow_period,
      signal_period,
    }
  }

  pub fn compute(&self, series: &CandleSeries) -> MacdResult {
    let lines = macd(&series.closes(), self.fast_period, self.slow_period, self.signal_period);

    let current_macd = last_defined(&lines.macd_line);
    let current_signal = last_defined(&lines.signal_line);
    let current_histogram = last_defined(&lines.histogram);

    let signal = match (current_macd, current_signal) {
      (Some(m), Some(s)) if m > s => IndicatorSignal::Bullish,
      (Some(_), Some(_)) => IndicatorSignal::Bearish,
      _ => IndicatorSignal::Neutral,
    };

    MacdResult {
      name: "MACD".to_string(),
      macd_line: fill_undefined(&lines.macd_line),
      signal_line: fill_undefined(&lines.signal_line),
      histogram: fill_undefined(&lines.histogram),
      current_macd,
      current_signal,
      current_histogram,
      signal,
    }
  }
}

impl Indicator for Macd {
  fn key(&self) -> String {
    "MACD".to_string()
  }

  fn calculate(&self, series: &CandleSeries) -> Result<IndicatorResult, AnalysisError> {
    if self.fast_period == 0 || self.signal_period == 0 || self.fast_period >= self.slow_period {
      return Err(AnalysisError::InvalidParameter(format!(
        "invalid MACD periods {}/{}/{}",
        self.fast_period, self.slow_period, self.signal_period
      )));
    }
    Ok(IndicatorResult::Macd(self.compute(series)))
  }
}
