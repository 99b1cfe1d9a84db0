/**
* filename : volume_profile
* author : HAMA
* date: 2025. 5. 12.
* description: 거래량 프로파일 레벨
**/

use crate::models::{Candle, LevelType, SupportResistanceLevel};
use super::{touch_stats, LevelDetector};

/// 가격 구간별 거래량 분포
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeProfile {
  pub min_price: f64,
  pub bin_width: f64,
  pub volumes: Vec<f64>,
}

impl VolumeProfile {
  /// 각 캔들의 거래량을 자신의 고저 범위에 균등 분배.
  /// 전체 범위가 0이면 None
  pub fn build(candles: &[Candle], bins: usize) -> Option<Self> {
    if bins == 0 || candles.is_empty() {
      return None;
    }

    let min_price = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let max_price = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let span = max_price - min_price;
    if span <= 0.0 {
      return None;
    }

    let bin_width = span / bins as f64;
    let mut volumes = vec![0.0; bins];
    let bin_of = |price: f64| (((price - min_price) / bin_width) as usize).min(bins - 1);

    for candle in candles {
      let range = candle.range();
      if range <= 0.0 {
        volumes[bin_of(candle.low)] += candle.volume;
        continue;
      }

      for bin in bin_of(candle.low)..=bin_of(candle.high) {
        let bin_low = min_price + bin as f64 * bin_width;
        let bin_high = bin_low + bin_width;
        let overlap = candle.high.min(bin_high) - candle.low.max(bin_low);
        if overlap > 0.0 {
          volumes[bin] += candle.volume * overlap / range;
        }
      }
    }

    Some(VolumeProfile {
      min_price,
      bin_width,
      volumes,
    })
  }

  pub fn bin_center(&self, bin: usize) -> f64 {
    self.min_price + (bin as f64 + 0.5) * self.bin_width
  }

  pub fn average(&self) -> f64 {
    self.volumes.iter().sum::<f64>() / self.volumes.len() as f64
  }

  /// ±radius 구간의 최대값인지. 같은 값이면 가장 왼쪽 구간만 인정
  pub fn is_local_peak(&self, bin: usize, radius: usize) -> bool {
    let value = self.volumes[bin];
    let start = bin.saturating_sub(radius);
    let end = (bin + radius).min(self.volumes.len() - 1);

    (start..=end).all(|j| match j.cmp(&bin) {
      std::cmp::Ordering::Less => self.volumes[j] < value,
      std::cmp::Ordering::Equal => true,
      std::cmp::Ordering::Greater => self.volumes[j] <= value,
    })
  }
}

#[derive(Debug, Clone)]
pub struct VolumeProfileDetector {
  bins: usize,
  threshold: f64,
  peak_radius: usize,
}

impl VolumeProfileDetector {
  pub fn new(bins: usize, threshold: f64, peak_radius: usize) -> Self {
    VolumeProfileDetector {
      bins,
      threshold,
      peak_radius,
    }
  }
}

impl LevelDetector for VolumeProfileDetector {
  fn name(&self) -> &'static str {
    "volume_profile"
  }

  fn detect(&self, candles: &[Candle], current_price: f64) -> Vec<SupportResistanceLevel> {
    let Some(profile) = VolumeProfile::build(candles, self.bins) else {
      return Vec::new();
    };
    let average = profile.average();
    if average <= 0.0 {
      return Vec::new();
    }

    (0..profile.volumes.len())
      .filter(|&bin| profile.volumes[bin] > self.threshold * average && profile.is_local_peak(bin, self.peak_radius))
      .map(|bin| {
        let price = profile.bin_center(bin);
        let volume = profile.volumes[bin];
        let (touches, last_touch) = touch_stats(candles, price);

        SupportResistanceLevel::provisional(
          price,
          LevelType::relative_to(price, current_price),
          (2.0 * volume / average).min(10.0),
          touches.max(1),
        )
        .with_last_touch(last_touch)
        .with_volume(volume)
      })
      .collect()
  }
}
