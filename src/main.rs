/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use std::sync::Arc;

use anyhow::{bail, Context};

use ta_engine::analysis::{AnalysisService, CrossTimeframeAggregator, TimeframeAnalyzer};
use ta_engine::commentary::{GeminiClient, PromptBuilder};
use ta_engine::config::Config;
use ta_engine::http::{build_router, AppState};
use ta_engine::market_data::CsvDataProvider;
use ta_engine::models::TechnicalAnalysisRequest;
use ta_engine::utils::{logging, parse_date};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("기술적 분석 엔진 시작... (v{})", ta_engine::VERSION);

    // 명령줄 인수 확인
    let args: Vec<String> = std::env::args().collect();
    let service = build_service(&config)?;

    match args.get(1).map(|s| s.as_str()) {
        None | Some("serve") => run_server(config, service).await?,
        Some("analyze") => run_analyze(&args[2..], service).await?,
        Some(other) => bail!(
            "unknown command '{}'. usage: ta-engine [serve | analyze <SYMBOL> <FROM> <TO> <TF>[,<TF>...]]",
            other
        ),
    }

    Ok(())
}

fn build_service(config: &Config) -> Result<AnalysisService, anyhow::Error> {
    let provider = Arc::new(CsvDataProvider::new(&config.data.csv_dir));
    let mut service = AnalysisService::new(provider, TimeframeAnalyzer::new(&config.analysis))
        .with_aggregator(CrossTimeframeAggregator::from_config(&config.analysis));
    log::info!("CSV 데이터 제공자 초기화 완료: {}", config.data.csv_dir);

    if config.commentary.enabled {
        let client = GeminiClient::new(&config.commentary).context("AI 코멘트 클라이언트 초기화 실패")?;
        let prompt = PromptBuilder::from_config(&config.commentary)?;
        service = service.with_commentary(Arc::new(client), prompt);
        log::info!("AI 코멘트 활성화: 모델 = {}", config.commentary.model);
    }

    Ok(service)
}

async fn run_server(config: Config, service: AnalysisService) -> Result<(), anyhow::Error> {
    let app = build_router(AppState { service });
    log::info!("API 라우트 초기화 완료");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("서버 시작: http://{}/", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_analyze(args: &[String], service: AnalysisService) -> Result<(), anyhow::Error> {
    let [symbol, from, to, timeframes] = args else {
        bail!("usage: ta-engine analyze <SYMBOL> <FROM YYYY-MM-DD> <TO YYYY-MM-DD> <TF>[,<TF>...]");
    };

    let request = TechnicalAnalysisRequest {
        stock_name: symbol.clone(),
        timeframes: timeframes.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
        from_date: parse_date(from).with_context(|| format!("invalid from date '{}'", from))?,
        to_date: parse_date(to).with_context(|| format!("invalid to date '{}'", to))?,
    };

    log::info!("분석 모드: {} {:?}", request.stock_name, request.timeframes);
    let response = service.analyze(request, true).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
