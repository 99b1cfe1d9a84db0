//! 기술적 분석 엔진 라이브러리
//!
//! 여러 타임프레임의 OHLCV 데이터에서 지표, 캔들 패턴, 지지/저항 레벨을 계산하고
//! 타임프레임 간 요약을 만듭니다.

pub mod analysis;
pub mod commentary;
pub mod config;
pub mod error;
pub mod http;
pub mod indicators;
pub mod levels;
pub mod market_data;
pub mod models;
pub mod patterns;
pub mod utils;

// 핵심 타입 재노출
pub use crate::analysis::{AnalysisService, CrossTimeframeAggregator, TimeframeAnalyzer};
pub use crate::config::Config;
pub use crate::error::AnalysisError;
pub use crate::market_data::{CsvDataProvider, HistoricalDataProvider, Timeframe};
pub use crate::models::{
    AnalysisSummary, Candle, CandleSeries, TechnicalAnalysisRequest, TechnicalAnalysisResponse,
    TimeframeAnalysis,
};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AnalysisError>;
