/**
* filename : reducer
* author : HAMA
* date: 2025. 5. 12.
* description: 레벨 병합, 순위, 최근접 레벨
**/

use std::cmp::Ordering;

use crate::models::{LevelType, SupportResistanceLevel};
use crate::utils::math::{desc, distance_pct, is_within};

/// 전략별 후보를 하나로 합친다.
///
/// 강도 내림차순(같으면 가격 오름차순)으로 보면서 이미 채택된 레벨과 `tolerance` 이내인
/// 후보는 그 레벨에 흡수된다. 흡수 시 터치 수는 더하고 마지막 터치는 늦은 쪽을 유지한다.
/// 유형과 현재가 대비 거리는 마지막에 현재가 기준으로 다시 계산한다.
pub fn merge_levels(
  mut candidates: Vec<SupportResistanceLevel>,
  current_price: f64,
  tolerance: f64,
) -> Vec<SupportResistanceLevel> {
  candidates.sort_by(|a, b| desc(a.strength, b.strength).then_with(|| a.price.total_cmp(&b.price)));

  let mut merged: Vec<SupportResistanceLevel> = Vec::with_capacity(candidates.len());
  for candidate in candidates {
    match merged.iter_mut().find(|kept| is_within(kept.price, candidate.price, tolerance)) {
      Some(kept) => {
        kept.touches += candidate.touches;
        kept.last_touch_timestamp = kept.last_touch_timestamp.max(candidate.last_touch_timestamp);
        if kept.volume_at_level.is_none() {
          kept.volume_at_level = candidate.volume_at_level;
        }
      }
      None => merged.push(candidate),
    }
  }

  for level in &mut merged {
    level.level_type = LevelType::relative_to(level.price, current_price);
    level.distance_from_current = distance_pct(level.price, current_price);
  }

  merged
}

fn rank_order(a: &SupportResistanceLevel, b: &SupportResistanceLevel) -> Ordering {
  desc(a.strength, b.strength)
    .then_with(|| a.distance_from_current.total_cmp(&b.distance_from_current))
    .then_with(|| a.price.total_cmp(&b.price))
}

/// 해당 유형의 상위 `top`개. 강도 내림차순, 같으면 가까운 순, 그다음 가격 오름차순
pub fn rank_levels(levels: &[SupportResistanceLevel], level_type: LevelType, top: usize) -> Vec<SupportResistanceLevel> {
  let mut ranked: Vec<SupportResistanceLevel> = levels.iter().filter(|l| l.level_type == level_type).cloned().collect();
  ranked.sort_by(rank_order);
  ranked.truncate(top);
  ranked
}

/// 현재가보다 낮은 지지선 중 가장 높은 것
pub fn nearest_support(levels: &[SupportResistanceLevel], current_price: f64) -> Option<SupportResistanceLevel> {
  levels
    .iter()
    .filter(|l| l.level_type == LevelType::Support && l.price < current_price)
    .max_by(|a, b| a.price.total_cmp(&b.price).then_with(|| desc(a.strength, b.strength)))
    .cloned()
}

/// 현재가보다 높은 저항선 중 가장 낮은 것
pub fn nearest_resistance(levels: &[SupportResistanceLevel], current_price: f64) -> Option<SupportResistanceLevel> {
  levels
    .iter()
    .filter(|l| l.level_type == LevelType::Resistance && l.price > current_price)
    .min_by(|a, b| a.price.total_cmp(&b.price).then_with(|| desc(a.strength, b.strength)))
    .cloned()
}
