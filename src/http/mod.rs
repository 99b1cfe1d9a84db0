use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::AnalysisService;
use crate::error::AnalysisError;
use crate::models::{TechnicalAnalysisRequest, TechnicalAnalysisResponse};
use crate::utils::parse_date;

#[derive(Clone)]
pub struct AppState {
  pub service: AnalysisService,
}

#[derive(Debug, Serialize)]
struct Health {
  status: &'static str,
  version: &'static str,
}

pub fn build_router(state: AppState) -> Router {
  let cors = CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);

  Router::new()
    .route("/health", get(|| async { Json(Health { status: "ok", version: crate::VERSION }) }))
    .route("/technical-analysis/:stock_name", post(technical_analysis))
    .route("/technical-analysis/:stock_name/quick", get(quick_analysis))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// 오류 응답 본문: `{ "error": kind, "message": text, "timeframe": optional }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeframe: Option<String>,
}

#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl From<AnalysisError> for ApiError {
  fn from(e: AnalysisError) -> Self {
    ApiError(e)
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match &self.0 {
      AnalysisError::DataNotFound(_) => StatusCode::NOT_FOUND,
      e if e.is_client_error() => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      log::error!("요청 처리 실패: {}", self.0);
    }

    let body = ErrorBody {
      error: self.0.kind().to_string(),
      message: self.0.to_string(),
      timeframe: self.0.timeframe().map(|s| s.to_string()),
    };
    (status, Json(body)).into_response()
  }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
  pub timeframes: String,
  pub from_date: String,
  pub to_date: String,
  /// 코멘트는 요청할 때만 생성한다 (quick 분석은 항상 포함)
  #[serde(default)]
  pub include_ai_opinion: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuickParams {
  #[serde(default = "default_timeframe")]
  pub timeframe: String,
  #[serde(default = "default_days")]
  pub days: i64,
}

fn default_timeframe() -> String {
  "1day".to_string()
}

fn default_days() -> i64 {
  100
}

fn date_param(name: &str, value: &str) -> Result<chrono::NaiveDate, AnalysisError> {
  parse_date(value).ok_or_else(|| AnalysisError::InvalidParameter(format!("{} must be YYYY-MM-DD, got '{}'", name, value)))
}

impl AnalysisParams {
  pub fn into_request(self, stock_name: String) -> Result<TechnicalAnalysisRequest, AnalysisError> {
    let timeframes: Vec<String> = self
      .timeframes
      .split(',')
      .map(|s| s.trim())
      .filter(|s| !s.is_empty())
      .map(|s| s.to_string())
      .collect();

    Ok(TechnicalAnalysisRequest {
      stock_name,
      timeframes,
      from_date: date_param("from_date", &self.from_date)?,
      to_date: date_param("to_date", &self.to_date)?,
    })
  }
}

async fn technical_analysis(
  State(state): State<AppState>,
  Path(stock_name): Path<String>,
  Query(params): Query<AnalysisParams>,
) -> Result<Json<TechnicalAnalysisResponse>, ApiError> {
  let include_ai_opinion = params.include_ai_opinion;
  let request = params.into_request(stock_name)?;
  let response = state.service.analyze(request, include_ai_opinion).await?;
  Ok(Json(response))
}

async fn quick_analysis(
  State(state): State<AppState>,
  Path(stock_name): Path<String>,
  Query(params): Query<QuickParams>,
) -> Result<Json<TechnicalAnalysisResponse>, ApiError> {
  let response = state.service.quick_analysis(&stock_name, &params.timeframe, params.days).await?;
  Ok(Json(response))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert_eq!(ApiError(AnalysisError::InvalidTimeframe("2h".into())).status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError(AnalysisError::NoSuccessfulAnalysis).status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError(AnalysisError::DataNotFound("x".into())).status(), StatusCode::NOT_FOUND);
    assert_eq!(
      ApiError(AnalysisError::ProviderError("down".into())).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_params_into_request() {
    let params = AnalysisParams {
      timeframes: "1day, 1hour,,15minute".to_string(),
      from_date: "2024-01-01".to_string(),
      to_date: "2024-03-31".to_string(),
      include_ai_opinion: false,
    };
    let request = params.into_request("ACME".to_string()).unwrap();

    assert_eq!(request.timeframes, vec!["1day", "1hour", "15minute"]);
    assert_eq!(request.to_date.to_string(), "2024-03-31");
  }

  #[test]
  fn test_commentary_off_unless_requested() {
    let params: AnalysisParams = serde_json::from_value(serde_json::json!({
      "timeframes": "1day",
      "from_date": "2024-01-01",
      "to_date": "2024-03-31"
    }))
    .unwrap();
    assert!(!params.include_ai_opinion);

    let params: AnalysisParams = serde_json::from_value(serde_json::json!({
      "timeframes": "1day",
      "from_date": "2024-01-01",
      "to_date": "2024-03-31",
      "include_ai_opinion": true
    }))
    .unwrap();
    assert!(params.include_ai_opinion);
  }

  #[test]
  fn test_bad_date_rejected() {
    let params = AnalysisParams {
      timeframes: "1day".to_string(),
      from_date: "01/01/2024".to_string(),
      to_date: "2024-03-31".to_string(),
      include_ai_opinion: true,
    };
    assert!(matches!(params.into_request("ACME".to_string()), Err(AnalysisError::InvalidParameter(_))));
  }
}
