/**
* filename : utils
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::models::IndicatorSignal;

// 미정의 값을 0으로 채운 고정 길이 배열 (직렬화 호환 규칙)
pub fn fill_undefined(values: &[Option<f64>]) -> Vec<f64> {
  values.iter().map(|v| v.unwrap_or(0.0)).collect()
}

// 마지막으로 정의된 값
pub fn last_defined(values: &[Option<f64>]) -> Option<f64> {
  values.iter().rev().find_map(|v| *v)
}

// 가격과 지표값 비교 신호 (MA/EMA/VWAP 공통)
pub fn price_vs_value_signal(price: Option<f64>, value: Option<f64>) -> IndicatorSignal {
  match (price, value) {
    (Some(price), Some(value)) if price > value => IndicatorSignal::Bullish,
    (Some(_), Some(_)) => IndicatorSignal::Bearish,
    _ => IndicatorSignal::Neutral,
  }
}

// 고정 윈도우 롤링 계산 (윈도우가 채워지기 전은 None)
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
  F: Fn(&[f64]) -> Option<f64>,
{
  let mut out = vec![None; values.len()];
  if period == 0 || values.len() < period {
    return out;
  }

  for end in period..=values.len() {
    out[end - 1] = f(&values[end - period..end]);
  }

  out
}
