use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Support,
    Resistance,
}

impl LevelType {
    /// 현재가 기준 분류: 현재가보다 낮으면 지지, 그 외 저항
    pub fn relative_to(price: f64, current_price: f64) -> Self {
        if price < current_price {
            LevelType::Support
        } else {
            LevelType::Resistance
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    pub price: f64,
    pub level_type: LevelType,
    /// 0 ~ 10
    pub strength: f64,
    pub touches: usize,
    pub last_touch_timestamp: Option<DateTime<Utc>>,
    pub volume_at_level: Option<f64>,
    /// |price - current| / current * 100
    pub distance_from_current: f64,
    /// 추세선처럼 시간에 따라 움직이는 레벨 여부. 현재 탐지기는 모두 수평 레벨만 만든다.
    pub is_dynamic: bool,
}

impl SupportResistanceLevel {
    /// 탐지 단계에서 쓰는 생성자. 유형은 임시값이며 병합 단계에서 다시 계산된다.
    pub fn provisional(price: f64, level_type: LevelType, strength: f64, touches: usize) -> Self {
        SupportResistanceLevel {
            price,
            level_type,
            strength,
            touches,
            last_touch_timestamp: None,
            volume_at_level: None,
            distance_from_current: 0.0,
            is_dynamic: false,
        }
    }

    pub fn with_last_touch(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.last_touch_timestamp = timestamp;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume_at_level = Some(volume);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceActionSignal {
    ApproachingSupport,
    Breakdown,
    ApproachingResistance,
    Breakout,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Breakout,
    Breakdown,
}

/// 최근 유의미한 레벨 돌파
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBreak {
    pub level_price: f64,
    pub break_type: BreakType,
    pub timestamp: DateTime<Utc>,
    pub candle_index: usize,
    pub close_price: f64,
    pub level_strength: f64,
    pub significance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceResult {
    pub support_levels: Vec<SupportResistanceLevel>,
    pub resistance_levels: Vec<SupportResistanceLevel>,
    pub nearest_support: Option<SupportResistanceLevel>,
    pub nearest_resistance: Option<SupportResistanceLevel>,
    pub current_price: f64,
    pub price_action_signal: PriceActionSignal,
    pub recent_breaks: Vec<LevelBreak>,
}
