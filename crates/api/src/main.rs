use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use binance::BinanceRest;
use engine::alert::alerts_for;
use engine::driver::{build_sink, run_pass};
use engine::report::BatchReport;
use engine::sink::{AlertSink, notify_best_effort};
use engine::{BinanceFeed, CandleProvider, MonitorConfig, PassError};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    config: Arc<MonitorConfig>,
    provider: Arc<dyn CandleProvider>,
    sink: Option<Arc<dyn AlertSink>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,engine=info,axum=info".into()),
        )
        .init();

    let config = MonitorConfig::from_env()?;
    let rest = BinanceRest::new(&config.binance_base_url, config.http_timeout)
        .context("binance client init failed")?;
    let provider = Arc::new(BinanceFeed::new(rest, config.timeframes));
    let sink = build_sink(&config)?;

    let addr: SocketAddr = config.bind_addr.parse().context("invalid BIND_ADDR")?;
    let state = AppState {
        config: Arc::new(config),
        provider,
        sink: Some(sink),
    };

    let app = router(state);

    info!("api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", get(analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

/// Проход по запросу. Алерты уходят в фоне, ответ доставку не ждёт.
async fn analyze(
    State(state): State<AppState>,
) -> Result<Json<BatchReport>, (StatusCode, Json<serde_json::Value>)> {
    let batch = run_pass(state.provider.as_ref(), &state.config)
        .await
        .map_err(pass_err)?;

    if let Some(sink) = state.sink.clone() {
        let messages = alerts_for(&batch);
        tokio::spawn(async move {
            for text in messages {
                notify_best_effort(sink.as_ref(), &text).await;
            }
        });
    }

    Ok(Json(BatchReport::from(&batch)))
}

fn pass_err(e: PassError) -> (StatusCode, Json<serde_json::Value>) {
    error!("pass failed: {}", e);
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": "analysis failed", "details": e.to_string()})),
    )
}
