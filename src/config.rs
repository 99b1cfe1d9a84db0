/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
    pub data: DataConfig,
    pub commentary: CommentaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Parameters of a single-timeframe analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub min_candles: usize,
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    /// 요약에 남길 최근 돌파 수 (전 타임프레임 합산)
    pub summary_max_breaks: usize,
    pub levels: LevelConfig,
}

/// Support/resistance pipeline constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub pivot_window: usize,
    pub cluster_tolerance: f64,
    pub volume_bins: usize,
    pub volume_threshold: f64,
    pub volume_peak_radius: usize,
    pub merge_tolerance: f64,
    pub top_levels: usize,
    pub proximity_pct: f64,
    pub change_lookback: usize,
    pub major_strength: f64,
    pub break_lookback: usize,
    pub break_min_strength: f64,
    pub max_breaks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub csv_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
    pub timeout_ms: u64,
    pub prompt_template_path: Option<String>,
}

impl Config {
    /// Load configuration: optional `config.*` file, then `TA__*` env vars, then legacy overrides
    pub fn load() -> Result<Self, AnalysisError> {
        Self::load_from("config")
    }

    pub fn load_from(base_name: &str) -> Result<Self, AnalysisError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(base_name).required(false))
            .add_source(config::Environment::with_prefix("TA").separator("__"))
            .build()
            .map_err(|e| AnalysisError::ConfigError(format!("Failed to read configuration: {}", e)))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .map_err(|e| AnalysisError::ConfigError(format!("Failed to parse configuration: {}", e)))?;

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply environment variable overrides for sensitive/runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("GEMINI_API_KEY") { if !v.is_empty() { self.commentary.api_key = Some(v); } }
        if let Ok(v) = env::var("GEMINI_MODEL") { if !v.is_empty() { self.commentary.model = v; } }
        if let Ok(v) = env::var("LOG_LEVEL") { if !v.is_empty() { self.logging.level = v.to_lowercase(); } }
        if let Ok(v) = env::var("CSV_DATA_DIR") { if !v.is_empty() { self.data.csv_dir = v; } }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let a = &self.analysis;
        if a.min_candles == 0 {
            return Err(AnalysisError::ConfigError("analysis.min_candles must be positive".to_string()));
        }
        if a.sma_periods.iter().chain(a.ema_periods.iter()).any(|p| *p == 0) {
            return Err(AnalysisError::ConfigError("moving average periods must be positive".to_string()));
        }
        if a.rsi_period == 0 || a.macd_signal == 0 || a.macd_fast == 0 {
            return Err(AnalysisError::ConfigError("oscillator periods must be positive".to_string()));
        }
        if a.macd_fast >= a.macd_slow {
            return Err(AnalysisError::ConfigError("analysis.macd_fast must be below analysis.macd_slow".to_string()));
        }
        if a.bollinger_period < 2 {
            return Err(AnalysisError::ConfigError("analysis.bollinger_period must be at least 2".to_string()));
        }
        if a.levels.volume_bins == 0 || a.levels.pivot_window == 0 {
            return Err(AnalysisError::ConfigError("level detection windows must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_candles: 50,
            sma_periods: vec![20, 50],
            ema_periods: vec![20, 50],
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std: 2.0,
            summary_max_breaks: 5,
            levels: LevelConfig::default(),
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            pivot_window: 5,
            cluster_tolerance: 0.005,
            volume_bins: 50,
            volume_threshold: 1.5,
            volume_peak_radius: 3,
            merge_tolerance: 0.001,
            top_levels: 5,
            proximity_pct: 2.0,
            change_lookback: 5,
            major_strength: 8.0,
            break_lookback: 20,
            break_min_strength: 5.0,
            max_breaks: 3,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_dir: "./data".to_string(),
        }
    }
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        CommentaryConfig {
            enabled: false,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.3,
            max_tokens: 1000,
            top_p: 0.9,
            top_k: 40,
            timeout_ms: 30_000,
            prompt_template_path: None,
        }
    }
}
