//! 수학 관련 유틸리티
//!
//! 통계, 비율, 반올림 함수 제공

use std::cmp::Ordering;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use statrs::statistics::Statistics;

/// 값을 범위 내로 제한
pub fn clamp(value: f64, min_value: f64, max_value: f64) -> f64 {
  value.max(min_value).min(max_value)
}

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 표본 표준 편차 (n-1)
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
  if values.len() < 2 {
    return None;
  }

  let std = values.iter().std_dev();
  if std.is_nan() {
    None
  } else {
    Some(std)
  }
}

/// 변화율 (백분율)
pub fn percent_change(from: f64, to: f64) -> f64 {
  if from == 0.0 {
    return 0.0;
  }
  (to - from) / from * 100.0
}

/// 기준 가격 대비 거리 (백분율, 절대값)
pub fn distance_pct(price: f64, reference: f64) -> f64 {
  if reference == 0.0 {
    return 0.0;
  }
  (price - reference).abs() / reference * 100.0
}

/// 두 가격이 큰 쪽 기준 `tolerance` 비율 이내인지
pub fn is_within(a: f64, b: f64, tolerance: f64) -> bool {
  (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

/// 소수점 `dp` 자리 반올림 (십진 반올림, 이진 오차 없이)
pub fn round_dp(value: f64, dp: u32) -> f64 {
  Decimal::from_f64(value)
    .map(|d| d.round_dp(dp))
    .and_then(|d| d.to_f64())
    .unwrap_or(value)
}

/// NaN 안전 내림차순 비교
pub fn desc(a: f64, b: f64) -> Ordering {
  b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clamp() {
    assert_eq!(clamp(5.0, 1.0, 10.0), 5.0);
    assert_eq!(clamp(-5.0, 1.0, 10.0), 1.0);
    assert_eq!(clamp(15.0, 1.0, 10.0), 10.0);
  }

  #[test]
  fn test_sample_std_dev() {
    // 표본 표준편차: 2, 4, 4, 4, 5, 5, 7, 9 -> sqrt(32/7)
    let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let std = sample_std_dev(&values).unwrap();
    assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);

    assert_eq!(sample_std_dev(&[3.0, 3.0, 3.0]), Some(0.0));
    assert_eq!(sample_std_dev(&[1.0]), None);
  }

  #[test]
  fn test_distance_and_change() {
    assert!((distance_pct(98.0, 100.0) - 2.0).abs() < 1e-12);
    assert!((percent_change(100.0, 105.0) - 5.0).abs() < 1e-12);
    assert_eq!(percent_change(0.0, 5.0), 0.0);
  }

  #[test]
  fn test_is_within() {
    assert!(is_within(100.0, 100.05, 0.001));
    assert!(!is_within(100.0, 100.2, 0.001));
  }

  #[test]
  fn test_round_dp() {
    assert_eq!(round_dp(33.333333, 2), 33.33);
    assert_eq!(round_dp(66.666666, 2), 66.67);
  }
}
