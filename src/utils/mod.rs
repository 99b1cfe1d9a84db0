//! 시간 관련 유틸리티
//!
//! 타임스탬프 변환, 포맷팅 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// 날짜의 시작 시각 (UTC 00:00:00)
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// 날짜의 마지막 밀리초 (UTC 23:59:59.999)
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).unwrap_or_default())
}

/// YYYY-MM-DD 형식 날짜 파싱
pub fn parse_date(value: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
