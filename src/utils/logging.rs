//! 로깅 유틸리티
//!
//! 로그 초기화 및 분석 작업용 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;

use crate::error::AnalysisError;

/// 로깅 시스템 초기화
///
/// `RUST_LOG`가 설정되어 있으면 모듈별 필터로 그대로 적용되고,
/// 기본 레벨은 설정 파일의 `logging.level`을 따른다.
pub fn init(level: &str) -> Result<(), AnalysisError> {
  let mut builder = Builder::from_default_env();

  builder
    .filter_level(parse_level(level))
    .format_timestamp_millis()
    .try_init()
    .map_err(|e| AnalysisError::ConfigError(format!("Logger already initialised: {}", e)))?;

  log::info!("로깅 시스템 초기화 완료: 레벨 = {}", level);

  Ok(())
}

/// 로그 레벨 파싱
pub fn parse_level(level: &str) -> LevelFilter {
  match level.to_lowercase().as_str() {
    "trace" => LevelFilter::Trace,
    "debug" => LevelFilter::Debug,
    "info" => LevelFilter::Info,
    "warn" | "warning" => LevelFilter::Warn,
    "error" => LevelFilter::Error,
    "off" => LevelFilter::Off,
    _ => LevelFilter::Info,
  }
}

/// 분석 시작 로그
pub fn log_analysis_start(stock_name: &str, timeframes: &[String]) {
  log::info!("기술적 분석 시작: {} - 타임프레임: {:?}", stock_name, timeframes);
}

/// 분석 종료 로그
pub fn log_analysis_end(stock_name: &str, succeeded: usize, requested: usize) {
  log::info!("기술적 분석 완료: {} - 성공 {}/{}", stock_name, succeeded, requested);
}

/// 타임프레임 실패 로그
pub fn log_timeframe_failure(stock_name: &str, timeframe: &str, error: &AnalysisError) {
  log::error!("타임프레임 분석 실패 - {} {}: {}", stock_name, timeframe, error);
}
