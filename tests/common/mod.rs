#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use ta_engine::error::AnalysisError;
use ta_engine::market_data::{HistoricalDataProvider, Timeframe};
use ta_engine::models::{Candle, CandleSeries};

pub fn start() -> DateTime<Utc> {
  DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap() // 2024-01-01
}

pub fn candle(index: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
  Candle::new(start() + Duration::days(index), open, high, low, close, volume)
}

/// 종가가 매 캔들 1씩 오르는 시리즈 (거래량 일정)
pub fn rising_candles(len: usize) -> Vec<Candle> {
  (0..len as i64)
    .map(|k| {
      let close = 100.0 + k as f64;
      let open = close - 0.8;
      candle(k, open, close + 0.1, open - 0.1, close, 1_000.0)
    })
    .collect()
}

/// 시가 = 종가 = 고가 = 저가
pub fn flat_candles(len: usize) -> Vec<Candle> {
  (0..len as i64).map(|k| candle(k, 100.0, 100.0, 100.0, 100.0, 1_000.0)).collect()
}

/// 흔들리면서 오르는 시리즈
pub fn wavy_candles(len: usize, phase: f64) -> Vec<Candle> {
  let mut previous: f64 = 100.0;
  (0..len as i64)
    .map(|k| {
      let close = 100.0 + ((k as f64 + phase) / 4.0).sin() * 6.0 + k as f64 * 0.2;
      let open = previous;
      previous = close;
      candle(k, open, open.max(close) + 0.7, open.min(close) - 0.6, close, 800.0 + (k % 7) as f64 * 150.0)
    })
    .collect()
}

pub fn series(candles: Vec<Candle>) -> CandleSeries {
  CandleSeries::new(candles).unwrap()
}

/// 메모리 내 캔들 제공자. (심볼, 주기) 별로 미리 넣어둔 캔들을 날짜로 걸러 돌려준다.
#[derive(Default)]
pub struct InMemoryProvider {
  data: HashMap<(String, Timeframe), Vec<Candle>>,
}

impl InMemoryProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, symbol: &str, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
    self.data.insert((symbol.to_string(), timeframe), candles);
    self
  }
}

#[async_trait]
impl HistoricalDataProvider for InMemoryProvider {
  async fn fetch_candles(
    &self,
    symbol: &str,
    timeframe: Timeframe,
    from: NaiveDate,
    to: NaiveDate,
  ) -> Result<Vec<Candle>, AnalysisError> {
    let candles = self
      .data
      .get(&(symbol.to_string(), timeframe))
      .ok_or_else(|| AnalysisError::DataNotFound(format!("{} {}", symbol, timeframe)))?;

    Ok(candles
      .iter()
      .filter(|c| {
        let date = c.timestamp.date_naive();
        date >= from && date <= to
      })
      .cloned()
      .collect())
  }
}
