use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// 분석 가능한 캔들 주기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    Minute1,
    Minute3,
    Minute5,
    Minute10,
    Minute15,
    Minute30,
    Hour1,
    Day1,
}

lazy_static! {
    /// 요청 라벨 -> 주기. "minute", "day", "daily"는 별칭
    static ref TIMEFRAME_ALIASES: HashMap<&'static str, Timeframe> = {
        let mut m = HashMap::new();
        m.insert("1minute", Timeframe::Minute1);
        m.insert("minute", Timeframe::Minute1);
        m.insert("3minute", Timeframe::Minute3);
        m.insert("5minute", Timeframe::Minute5);
        m.insert("10minute", Timeframe::Minute10);
        m.insert("15minute", Timeframe::Minute15);
        m.insert("30minute", Timeframe::Minute30);
        m.insert("1hour", Timeframe::Hour1);
        m.insert("1day", Timeframe::Day1);
        m.insert("day", Timeframe::Day1);
        m.insert("daily", Timeframe::Day1);
        m
    };
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Timeframe::Minute1,
        Timeframe::Minute3,
        Timeframe::Minute5,
        Timeframe::Minute10,
        Timeframe::Minute15,
        Timeframe::Minute30,
        Timeframe::Hour1,
        Timeframe::Day1,
    ];

    /// 대표 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1minute",
            Timeframe::Minute3 => "3minute",
            Timeframe::Minute5 => "5minute",
            Timeframe::Minute10 => "10minute",
            Timeframe::Minute15 => "15minute",
            Timeframe::Minute30 => "30minute",
            Timeframe::Hour1 => "1hour",
            Timeframe::Day1 => "1day",
        }
    }

    /// 데이터 제공자가 쓰는 interval 이름
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "minute",
            Timeframe::Minute3 => "3minute",
            Timeframe::Minute5 => "5minute",
            Timeframe::Minute10 => "10minute",
            Timeframe::Minute15 => "15minute",
            Timeframe::Minute30 => "30minute",
            Timeframe::Hour1 => "60minute",
            Timeframe::Day1 => "day",
        }
    }
}

impl FromStr for Timeframe {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TIMEFRAME_ALIASES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| AnalysisError::InvalidTimeframe(s.to_string()))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("1day".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert_eq!("DAY".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert_eq!("minute".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
        assert_eq!("1hour".parse::<Timeframe>().unwrap().interval(), "60minute");
    }

    #[test]
    fn test_unknown_label_rejected() {
        match "2hour".parse::<Timeframe>() {
            Err(AnalysisError::InvalidTimeframe(label)) => assert_eq!(label, "2hour"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_interval_names_are_not_labels() {
        // 제공자 interval 이름은 요청 라벨로 받지 않는다
        assert!("60minute".parse::<Timeframe>().is_err());
        assert!("1hour".parse::<Timeframe>().is_ok());
    }

    #[test]
    fn test_labels_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.label().parse::<Timeframe>().unwrap(), tf);
        }
    }
}
