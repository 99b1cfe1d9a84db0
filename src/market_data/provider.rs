use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AnalysisError;
use crate::models::Candle;
use crate::utils::{end_of_day, start_of_day, timestamp_to_datetime};
use super::Timeframe;

/// 과거 캔들 데이터 제공자 인터페이스
///
/// 반환되는 캔들은 시간 오름차순이어야 하며 `[from, to]` 양 끝 날짜를 포함한다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, AnalysisError>;
}

/// `{data_dir}/{SYMBOL}_{interval}.csv` 파일에서 캔들을 읽는 제공자
///
/// 헤더: `timestamp,open,high,low,close,volume` (timestamp는 epoch 밀리초)
pub struct CsvDataProvider {
    data_dir: PathBuf,
    delimiter: u8,
}

impl CsvDataProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_delimiter(data_dir, ',')
    }

    pub fn with_delimiter(data_dir: impl Into<PathBuf>, delimiter: char) -> Self {
        CsvDataProvider {
            data_dir: data_dir.into(),
            delimiter: delimiter as u8,
        }
    }

    pub fn file_path(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}.csv", symbol.to_uppercase(), timeframe.interval()))
    }

    fn load(&self, path: PathBuf, from: NaiveDate, to: NaiveDate) -> Result<Vec<Candle>, AnalysisError> {
        let start = start_of_day(from).timestamp_millis();
        let end = end_of_day(to).timestamp_millis();

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| AnalysisError::ProviderError(format!("{}: {}", path.display(), e)))?;

        let mut candles = Vec::new();
        for rec in rdr.deserialize() {
            let row: CsvRow = rec.map_err(|e| AnalysisError::ParseError(e.to_string()))?;
            if row.timestamp < start || row.timestamp > end {
                continue;
            }

            let timestamp = timestamp_to_datetime(row.timestamp)
                .ok_or_else(|| AnalysisError::ParseError(format!("invalid timestamp {}", row.timestamp)))?;
            candles.push(Candle::new(timestamp, row.open, row.high, row.low, row.close, row.volume));
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

#[async_trait]
impl HistoricalDataProvider for CsvDataProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, AnalysisError> {
        let path = self.file_path(symbol, timeframe);
        if !path.exists() {
            return Err(AnalysisError::DataNotFound(format!(
                "no {} data for {} ({})",
                timeframe,
                symbol,
                path.display()
            )));
        }

        let candles = self.load(path, from, to)?;
        log::debug!("{} {} 캔들 {}개 로드", symbol, timeframe, candles.len());
        Ok(candles)
    }
}

#[derive(serde::Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}
