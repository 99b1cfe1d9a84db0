/**
* filename : mod
* author : HAMA
* date: 2025. 5. 13.
* description: 타임프레임 분석과 요약
**/

pub mod aggregator;
pub mod service;
pub mod timeframe;

pub use aggregator::CrossTimeframeAggregator;
pub use service::AnalysisService;
pub use timeframe::TimeframeAnalyzer;

use crate::error::AnalysisError;
use crate::models::{AnalysisSummary, CandleSeries, TimeframeAnalysis};

/// 실패한 타임프레임을 걸러낸 뒤 결과가 하나도 없으면 오류로 정리한다.
///
/// 모든 실패가 데이터 부족이면 첫 번째 데이터 부족 오류를, 그 외에는 `NoSuccessfulAnalysis`.
pub fn collect_successful(
    outcomes: Vec<(String, Result<TimeframeAnalysis, AnalysisError>)>,
    mut on_failure: impl FnMut(&str, &AnalysisError),
) -> Result<Vec<TimeframeAnalysis>, AnalysisError> {
    let mut succeeded = Vec::new();
    let mut failures = Vec::new();

    for (timeframe, outcome) in outcomes {
        match outcome {
            Ok(analysis) => succeeded.push(analysis),
            Err(e) => {
                on_failure(&timeframe, &e);
                failures.push(e);
            }
        }
    }

    if !succeeded.is_empty() {
        return Ok(succeeded);
    }

    let all_insufficient = !failures.is_empty()
        && failures.iter().all(|e| matches!(e, AnalysisError::InsufficientData { .. }));
    if all_insufficient {
        return Err(failures.swap_remove(0));
    }
    Err(AnalysisError::NoSuccessfulAnalysis)
}

/// 동기 엔진 진입점. (라벨, 캔들) 쌍마다 독립적으로 분석하고 요약한다.
pub fn analyze_timeframes(
    analyzer: &TimeframeAnalyzer,
    aggregator: &CrossTimeframeAggregator,
    inputs: &[(String, CandleSeries)],
) -> Result<(Vec<TimeframeAnalysis>, AnalysisSummary), AnalysisError> {
    let outcomes = inputs
        .iter()
        .map(|(timeframe, series)| (timeframe.clone(), analyzer.analyze(timeframe, series)))
        .collect();

    let results = collect_successful(outcomes, |timeframe, e| {
        log::error!("타임프레임 분석 실패 - {}: {}", timeframe, e);
    })?;
    let summary = aggregator.aggregate(&results);

    Ok((results, summary))
}
