/**
* filename : service
* author : HAMA
* date: 2025. 5. 14.
* description: 데이터 조회 -> 타임프레임별 분석 -> 요약 -> AI 코멘트
**/

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use futures::future::join_all;
use uuid::Uuid;

use crate::commentary::{generate_opinion, CommentaryGenerator, PromptBuilder};
use crate::error::AnalysisError;
use crate::market_data::{HistoricalDataProvider, Timeframe};
use crate::models::{CandleSeries, TechnicalAnalysisRequest, TechnicalAnalysisResponse, TimeframeAnalysis};
use crate::utils::logging::{log_analysis_end, log_analysis_start, log_timeframe_failure};
use super::{collect_successful, CrossTimeframeAggregator, TimeframeAnalyzer};

pub const QUICK_ANALYSIS_MIN_DAYS: i64 = 30;
pub const QUICK_ANALYSIS_MAX_DAYS: i64 = 365;

/// 비동기 분석 서비스.
///
/// 데이터 제공자와 코멘트 생성기는 주입받는다. 타임프레임마다 조회와 분석을 독립 작업으로
/// 실행하고 모두 끝난 뒤 요약한다. 계산은 blocking 작업자에서 돈다.
#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn HistoricalDataProvider>,
    analyzer: Arc<TimeframeAnalyzer>,
    aggregator: CrossTimeframeAggregator,
    commentary: Option<Arc<dyn CommentaryGenerator>>,
    prompt: PromptBuilder,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn HistoricalDataProvider>, analyzer: TimeframeAnalyzer) -> Self {
        AnalysisService {
            provider,
            analyzer: Arc::new(analyzer),
            aggregator: CrossTimeframeAggregator::default(),
            commentary: None,
            prompt: PromptBuilder::default(),
        }
    }

    pub fn with_commentary(mut self, generator: Arc<dyn CommentaryGenerator>, prompt: PromptBuilder) -> Self {
        self.commentary = Some(generator);
        self.prompt = prompt;
        self
    }

    pub fn with_aggregator(mut self, aggregator: CrossTimeframeAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    fn validate(request: &TechnicalAnalysisRequest) -> Result<Vec<(String, Timeframe)>, AnalysisError> {
        if request.stock_name.trim().is_empty() {
            return Err(AnalysisError::InvalidParameter("stock_name must not be empty".to_string()));
        }
        if request.timeframes.is_empty() {
            return Err(AnalysisError::InvalidParameter("at least one timeframe is required".to_string()));
        }
        if request.from_date > request.to_date {
            return Err(AnalysisError::InvalidParameter(format!(
                "from_date {} is after to_date {}",
                request.from_date, request.to_date
            )));
        }

        let mut parsed: Vec<(String, Timeframe)> = Vec::new();
        for label in &request.timeframes {
            let timeframe: Timeframe = label.parse()?;
            let label = label.trim().to_string();
            if !parsed.iter().any(|(existing, _)| *existing == label) {
                parsed.push((label, timeframe));
            }
        }
        Ok(parsed)
    }

    async fn analyze_one(
        &self,
        symbol: &str,
        label: String,
        timeframe: Timeframe,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TimeframeAnalysis, AnalysisError> {
        let candles = self.provider.fetch_candles(symbol, timeframe, from, to).await?;
        let series = CandleSeries::new(candles)?;

        let analyzer = Arc::clone(&self.analyzer);
        tokio::task::spawn_blocking(move || analyzer.analyze(&label, &series))
            .await
            .map_err(|e| AnalysisError::CalculationError(format!("analysis worker failed: {}", e)))?
    }

    pub async fn analyze(
        &self,
        request: TechnicalAnalysisRequest,
        include_commentary: bool,
    ) -> Result<TechnicalAnalysisResponse, AnalysisError> {
        let timeframes = Self::validate(&request)?;
        let labels: Vec<String> = timeframes.iter().map(|(label, _)| label.clone()).collect();
        log_analysis_start(&request.stock_name, &labels);

        let symbol = request.stock_name.as_str();
        let (from, to) = (request.from_date, request.to_date);
        let tasks = timeframes.into_iter().map(|(label, timeframe)| async move {
            let outcome = self.analyze_one(symbol, label.clone(), timeframe, from, to).await;
            (label, outcome)
        });
        let outcomes = join_all(tasks).await;

        let results = collect_successful(outcomes, |timeframe, e| {
            log_timeframe_failure(&request.stock_name, timeframe, e)
        })?;
        let summary = self.aggregator.aggregate(&results);
        log_analysis_end(&request.stock_name, results.len(), labels.len());

        let ai_opinion = match (&self.commentary, include_commentary) {
            (Some(generator), true) => {
                let opinion = match self.prompt.render(&request.stock_name, &results, &summary) {
                    Ok(prompt) => generate_opinion(generator.as_ref(), &prompt).await,
                    Err(e) => {
                        log::error!("프롬프트 생성 실패: {}", e);
                        crate::commentary::FALLBACK_ERROR.to_string()
                    }
                };
                Some(opinion)
            }
            _ => None,
        };

        Ok(TechnicalAnalysisResponse {
            analysis_id: Uuid::new_v4(),
            stock_name: request.stock_name,
            analysis_date: Utc::now(),
            timeframe_results: results,
            summary,
            ai_opinion,
        })
    }

    /// 오늘 기준 최근 `days`일(30~365) 단일 타임프레임 분석. 코멘트 포함
    pub async fn quick_analysis(
        &self,
        stock_name: &str,
        timeframe: &str,
        days: i64,
    ) -> Result<TechnicalAnalysisResponse, AnalysisError> {
        if !(QUICK_ANALYSIS_MIN_DAYS..=QUICK_ANALYSIS_MAX_DAYS).contains(&days) {
            return Err(AnalysisError::InvalidParameter(format!(
                "days must be between {} and {}, got {}",
                QUICK_ANALYSIS_MIN_DAYS, QUICK_ANALYSIS_MAX_DAYS, days
            )));
        }

        let to_date = Utc::now().date_naive();
        let request = TechnicalAnalysisRequest {
            stock_name: stock_name.to_string(),
            timeframes: vec![timeframe.to_string()],
            from_date: to_date - Duration::days(days),
            to_date,
        };
        self.analyze(request, true).await
    }
}
