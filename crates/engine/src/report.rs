//! JSON-представление прохода (API и `--json`)

use chrono::{DateTime, Utc};
use indicators::Trend;
use policy::{Signal, SignalReason};
use serde::Serialize;

use crate::analyzer::AnalysisResult;
use crate::basket::BatchResult;

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub timestamp: DateTime<Utc>,
    pub reference_symbol: String,
    pub reference_trend: Trend,
    pub results: Vec<InstrumentReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InstrumentReport {
    Analysis(AnalysisReport),
    Failed { symbol: String, error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub price: f64,
    pub rsi: f64,
    pub volume: f64,
    pub avg_volume: f64,
    pub volume_above_average: bool,
    pub short_term_trend: Trend,
    pub confirmation_trend: Trend,
    pub signal: Signal,
    pub reason: SignalReason,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(r: &AnalysisResult) -> Self {
        Self {
            symbol: r.symbol.clone(),
            price: r.price.0,
            rsi: r.rsi,
            volume: r.volume.0,
            avg_volume: r.avg_volume.0,
            volume_above_average: r.volume_above_average,
            short_term_trend: r.short_term_trend,
            confirmation_trend: r.confirmation_trend,
            signal: r.signal,
            reason: r.reason,
        }
    }
}

impl From<&BatchResult> for BatchReport {
    fn from(batch: &BatchResult) -> Self {
        let results = batch
            .entries
            .iter()
            .map(|e| match &e.outcome {
                Ok(r) => InstrumentReport::Analysis(r.into()),
                Err(err) => InstrumentReport::Failed {
                    symbol: e.symbol.clone(),
                    error: err.to_string(),
                },
            })
            .collect();

        Self {
            timestamp: batch.started_at,
            reference_symbol: batch.reference_symbol.clone(),
            reference_trend: batch.reference_trend,
            results,
        }
    }
}
