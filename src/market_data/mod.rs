pub mod provider;
pub mod timeframe;

pub use provider::{CsvDataProvider, HistoricalDataProvider};
pub use timeframe::Timeframe;

#[cfg(test)]
pub use provider::MockHistoricalDataProvider;
