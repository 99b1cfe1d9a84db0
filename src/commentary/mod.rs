/**
* filename : mod
* author : HAMA
* date: 2025. 5. 14.
* description: 분석 결과에 붙는 AI 코멘트 생성
**/

pub mod client;

pub use client::GeminiClient;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::CommentaryConfig;
use crate::error::AnalysisError;
use crate::models::{AnalysisSummary, IndicatorSignal, TimeframeAnalysis};

pub const FALLBACK_ERROR: &str = "Unable to generate AI opinion due to technical error.";
pub const FALLBACK_EMPTY: &str = "Unable to generate AI opinion at this time.";

pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"You are an experienced equity market technical analyst.
Review the technical analysis below and write a concise opinion covering the overall trend,
momentum, notable candlestick patterns, key support and resistance levels and the main risks.
Do not give personalised financial advice.

Historical data:
{{historical_data}}

Technical indicators:
{{technical_indicators}}

Summary:
{{summary}}
"#;

/// 프롬프트를 받아 자유 텍스트를 돌려주는 외부 생성기
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentaryGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct IndicatorDigest<'a> {
    signal: IndicatorSignal,
    current_value: Option<f64>,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct HistoricalDigest<'a> {
    stock_name: &'a str,
    timeframe: &'a str,
    data_points: usize,
    current_price: Option<f64>,
}

/// 템플릿의 `{{historical_data}}`, `{{technical_indicators}}`, `{{summary}}`를 채운다.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        PromptBuilder {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl PromptBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        PromptBuilder {
            template: template.into(),
        }
    }

    /// 설정에 템플릿 파일이 있으면 읽고, 없으면 기본 템플릿
    pub fn from_config(config: &CommentaryConfig) -> Result<Self, AnalysisError> {
        match &config.prompt_template_path {
            Some(path) => Ok(Self::new(std::fs::read_to_string(path)?)),
            None => Ok(Self::default()),
        }
    }

    pub fn render(
        &self,
        stock_name: &str,
        results: &[TimeframeAnalysis],
        summary: &AnalysisSummary,
    ) -> Result<String, AnalysisError> {
        // 과거 데이터 설명은 첫 번째 타임프레임 기준
        let historical = results.first().map(|first| HistoricalDigest {
            stock_name,
            timeframe: &first.timeframe,
            data_points: first.data_points,
            current_price: first.support_resistance.as_ref().map(|sr| sr.current_price),
        });

        let mut indicators = BTreeMap::new();
        for result in results {
            for (key, indicator) in &result.indicators {
                indicators.insert(
                    format!("{}_{}", result.timeframe, key),
                    IndicatorDigest {
                        signal: indicator.signal(),
                        current_value: indicator.current_value(),
                        name: indicator.name(),
                    },
                );
            }
        }

        Ok(self
            .template
            .replace("{{historical_data}}", &serde_json::to_string_pretty(&historical)?)
            .replace("{{technical_indicators}}", &serde_json::to_string_pretty(&indicators)?)
            .replace("{{summary}}", &serde_json::to_string_pretty(summary)?))
    }
}

/// 생성 실패는 분석 전체를 실패시키지 않고 고정 문구로 대체된다.
pub async fn generate_opinion(generator: &dyn CommentaryGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("AI 코멘트 응답이 비어 있음");
            FALLBACK_EMPTY.to_string()
        }
        Err(e) => {
            log::error!("AI 코멘트 생성 실패: {}", e);
            FALLBACK_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TimeframeAnalyzer;
    use crate::test_support::series_from_closes;

    fn sample() -> (Vec<TimeframeAnalysis>, AnalysisSummary) {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let result = TimeframeAnalyzer::default().analyze("1day", &series_from_closes(&closes)).unwrap();
        let results = vec![result];
        let summary = crate::analysis::CrossTimeframeAggregator::default().aggregate(&results);
        (results, summary)
    }

    #[test]
    fn test_render_fills_placeholders() {
        let (results, summary) = sample();
        let prompt = PromptBuilder::default().render("ACME", &results, &summary).unwrap();

        assert!(!prompt.contains("{{"));
        assert!(prompt.contains("\"1day_RSI\""));
        assert!(prompt.contains("\"stock_name\": \"ACME\""));
        assert!(prompt.contains("total_timeframes"));
    }

    #[test]
    fn test_custom_template() {
        let (results, summary) = sample();
        let prompt = PromptBuilder::new("S={{summary}}").render("ACME", &results, &summary).unwrap();
        assert!(prompt.starts_with("S={"));
    }

    #[tokio::test]
    async fn test_generation_error_falls_back() {
        let mut generator = MockCommentaryGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(AnalysisError::CommentaryError("timeout".to_string())));

        assert_eq!(generate_opinion(&generator, "prompt").await, FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let mut generator = MockCommentaryGenerator::new();
        generator.expect_generate().returning(|_| Ok("   ".to_string()));

        assert_eq!(generate_opinion(&generator, "prompt").await, FALLBACK_EMPTY);
    }

    #[tokio::test]
    async fn test_reply_passed_through() {
        let mut generator = MockCommentaryGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt| prompt.contains("hello"))
            .returning(|_| Ok("Uptrend intact.".to_string()));

        assert_eq!(generate_opinion(&generator, "hello").await, "Uptrend intact.");
    }
}
