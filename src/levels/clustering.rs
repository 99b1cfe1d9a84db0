/**
* filename : clustering
* author : HAMA
* date: 2025. 5. 12.
* description: 수평 가격 군집 레벨
**/

use chrono::{DateTime, Utc};

use crate::models::{Candle, LevelType, SupportResistanceLevel};
use super::LevelDetector;

/// 군집 구성원: 가격과 그 가격을 만든 캔들 시각
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
  pub price: f64,
  pub timestamp: DateTime<Utc>,
}

/// 고가/저가/종가를 정렬한 뒤 그룹 평균에서 `tolerance` 이내인 값끼리 묶는다.
///
/// 정확히 같은 가격은 먼저 하나로 합쳐진다(가장 늦은 시각 유지). 근접 가격은 그룹화 과정에서
/// 흡수되므로 별도의 허용오차 중복 제거는 하지 않는다.
#[derive(Debug, Clone)]
pub struct ClusteringDetector {
  tolerance: f64,
}

impl ClusteringDetector {
  pub fn new(tolerance: f64) -> Self {
    ClusteringDetector { tolerance }
  }

  /// 정렬된 고유 가격의 탐욕적 그룹화. 두 개 이상 모인 그룹만 반환
  pub fn group(&self, candles: &[Candle]) -> Vec<Vec<PricePoint>> {
    let mut points: Vec<PricePoint> = candles
      .iter()
      .flat_map(|c| {
        [c.high, c.low, c.close].map(|price| PricePoint {
          price,
          timestamp: c.timestamp,
        })
      })
      .collect();
    // 같은 가격 안에서는 최신 시각이 앞에 오므로 dedup 후 남는다
    points.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| b.timestamp.cmp(&a.timestamp)));
    points.dedup_by(|a, b| a.price == b.price);

    let mut groups = Vec::new();
    let mut current: Vec<PricePoint> = Vec::new();
    let mut sum = 0.0;

    for point in points {
      if !current.is_empty() {
        let avg = sum / current.len() as f64;
        if (point.price - avg).abs() > self.tolerance * avg {
          groups.push(std::mem::take(&mut current));
          sum = 0.0;
        }
      }
      current.push(point);
      sum += point.price;
    }
    if !current.is_empty() {
      groups.push(current);
    }

    groups.retain(|g| g.len() >= 2);
    groups
  }
}

impl LevelDetector for ClusteringDetector {
  fn name(&self) -> &'static str {
    "clustering"
  }

  fn detect(&self, candles: &[Candle], current_price: f64) -> Vec<SupportResistanceLevel> {
    self
      .group(candles)
      .into_iter()
      .map(|members| {
        let price = members.iter().map(|m| m.price).sum::<f64>() / members.len() as f64;
        let strength = (2.0 * members.len() as f64).min(10.0);
        // 평균 가격은 캔들 사이 빈 구간에 놓일 수 있어 구성원 시각을 쓴다
        let last_touch = members.iter().map(|m| m.timestamp).max();

        SupportResistanceLevel::provisional(
          price,
          LevelType::relative_to(price, current_price),
          strength,
          members.len(),
        )
        .with_last_touch(last_touch)
      })
      .collect()
  }
}
