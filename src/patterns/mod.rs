/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 캔들스틱 패턴 탐지
**/

pub mod double;
pub mod single;
pub mod triple;

pub use double::{Engulfing, Harami};
pub use single::{Doji, Hammer, Marubozu};
pub use triple::MorningStar;

use std::collections::BTreeMap;

use crate::models::{Candle, CandlestickPattern, PatternResult, PatternType};
use crate::utils::math::clamp;

/// 패턴 신뢰도 상한
pub const MAX_CONFIDENCE: f64 = 0.9;

/// 윈도우 하나에서 찾은 패턴
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
  pub name: &'static str,
  pub pattern_type: PatternType,
  pub confidence: f64,
  pub description: &'static str,
}

impl PatternMatch {
  pub fn new(name: &'static str, pattern_type: PatternType, confidence: f64, description: &'static str) -> Self {
    PatternMatch {
      name,
      pattern_type,
      confidence: clamp(confidence, 0.0, MAX_CONFIDENCE),
      description,
    }
  }
}

/// 패턴 계열 하나. `window()`개의 연속 캔들(마지막이 현재 캔들)을 받아 판정한다.
pub trait CandlePattern: Send + Sync {
  fn family(&self) -> &'static str;

  fn window(&self) -> usize;

  fn check(&self, window: &[Candle]) -> Option<PatternMatch>;

  /// 시리즈 전체를 한 번 스캔
  fn scan(&self, candles: &[Candle]) -> PatternResult {
    let size = self.window();
    let mut occurrences = Vec::new();

    if size > 0 && candles.len() >= size {
      for end in size..=candles.len() {
        let index = end - 1;
        if let Some(found) = self.check(&candles[end - size..end]) {
          occurrences.push(CandlestickPattern {
            name: found.name.to_string(),
            pattern_type: found.pattern_type,
            confidence: found.confidence,
            timestamp: candles[index].timestamp,
            description: found.description.to_string(),
            candle_index: index,
          });
        }
      }
    }

    PatternResult::new(self.family(), occurrences)
  }
}

/// 몸통/꼬리의 전체 범위 대비 비율. 범위가 0이면 None
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleRatios {
  pub body: f64,
  pub upper_shadow: f64,
  pub lower_shadow: f64,
}

impl CandleRatios {
  pub fn of(candle: &Candle) -> Option<Self> {
    let range = candle.range();
    if range <= 0.0 {
      return None;
    }

    Some(CandleRatios {
      body: candle.body() / range,
      upper_shadow: candle.upper_shadow() / range,
      lower_shadow: candle.lower_shadow() / range,
    })
  }
}

pub(crate) fn has_range(candles: &[Candle]) -> bool {
  candles.iter().all(|c| c.range() > 0.0)
}

pub struct PatternDetector {
  patterns: Vec<Box<dyn CandlePattern>>,
}

impl PatternDetector {
  pub fn new() -> Self {
    PatternDetector {
      patterns: vec![
        Box::new(Hammer),
        Box::new(Doji),
        Box::new(Marubozu),
        Box::new(Engulfing),
        Box::new(Harami),
        Box::new(MorningStar),
      ],
    }
  }

  pub fn with_patterns(patterns: Vec<Box<dyn CandlePattern>>) -> Self {
    PatternDetector { patterns }
  }

  /// 계열 이름 -> 결과. 발생이 없는 계열도 total_count 0으로 포함된다.
  pub fn detect_all(&self, candles: &[Candle]) -> BTreeMap<String, PatternResult> {
    self
      .patterns
      .iter()
      .map(|pattern| (pattern.family().to_string(), pattern.scan(candles)))
      .collect()
  }
}

impl Default for PatternDetector {
  fn default() -> Self {
    Self::new()
  }
}

pub fn detect_all(candles: &[Candle]) -> BTreeMap<String, PatternResult> {
  PatternDetector::new().detect_all(candles)
}
