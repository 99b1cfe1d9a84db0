/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data for analysis on {timeframe} (got {got} points, need {required})")]
    InsufficientData {
        timeframe: String,
        got: usize,
        required: usize,
    },

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid candle data: {0}")]
    InvalidData(String),

    #[error("Data not found: {0}")]
    DataNotFound(String),

    #[error("Data provider error: {0}")]
    ProviderError(String),

    #[error("Commentary error: {0}")]
    CommentaryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("No successful analysis for any timeframe")]
    NoSuccessfulAnalysis,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AnalysisError {
    /// 응답 본문에 쓰이는 짧은 오류 종류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InsufficientData { .. } => "insufficient_data",
            AnalysisError::InvalidTimeframe(_) => "invalid_timeframe",
            AnalysisError::InvalidParameter(_) => "invalid_parameter",
            AnalysisError::InvalidData(_) => "invalid_data",
            AnalysisError::DataNotFound(_) => "data_not_found",
            AnalysisError::ProviderError(_) => "provider_error",
            AnalysisError::CommentaryError(_) => "commentary_error",
            AnalysisError::ConfigError(_) => "config_error",
            AnalysisError::CalculationError(_) => "calculation_error",
            AnalysisError::NoSuccessfulAnalysis => "no_successful_analysis",
            AnalysisError::IoError(_) => "io_error",
            AnalysisError::SerializationError(_) => "serialization_error",
            AnalysisError::ParseError(_) => "parse_error",
        }
    }

    /// 호출자 입력 문제인지 여부 (HTTP 400 매핑용)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::InsufficientData { .. }
                | AnalysisError::InvalidTimeframe(_)
                | AnalysisError::InvalidParameter(_)
                | AnalysisError::InvalidData(_)
                | AnalysisError::NoSuccessfulAnalysis
        )
    }

    /// 오류가 특정 타임프레임에 묶여 있으면 그 라벨
    pub fn timeframe(&self) -> Option<&str> {
        match self {
            AnalysisError::InsufficientData { timeframe, .. } => Some(timeframe),
            _ => None,
        }
    }
}
