use chrono::{DateTime, Utc};
use futures_util::future::{join_all, try_join};
use indicators::{IndicatorError, Trend};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analyzer::{AnalysisResult, analyze, reference_trend};
use crate::config::StrategyParams;
use crate::feed::{CandleProvider, FetchError, Interval};

/// Почему у инструмента нет результата
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("precondition failed: {0}")]
    Precondition(#[from] IndicatorError),

    #[error(transparent)]
    DataUnavailable(#[from] FetchError),
}

/// Без тренда бенчмарка проход невозможен
#[derive(Debug, Clone, Error)]
pub enum PassError {
    #[error("reference {symbol} unavailable: {source}")]
    Reference {
        symbol: String,
        #[source]
        source: AnalysisError,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BasketParams {
    pub candle_limit: usize,
    pub strategy: StrategyParams,
}

impl Default for BasketParams {
    fn default() -> Self {
        Self {
            candle_limit: 100,
            strategy: StrategyParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstrumentOutcome {
    pub symbol: String,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

/// Один проход по корзине
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub started_at: DateTime<Utc>,
    pub reference_symbol: String,
    pub reference_trend: Trend,
    /// Порядок входа, без бенчмарка
    pub entries: Vec<InstrumentOutcome>,
}

impl BatchResult {
    pub fn results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &AnalysisError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.symbol.as_str(), err)))
    }
}

/// Сначала тренд бенчмарка, потом остальные символы параллельно.
/// Ошибка одного символа -> failed entry, проход продолжается.
pub async fn evaluate_basket<P: CandleProvider + ?Sized>(
    reference_symbol: &str,
    tracked_symbols: &[String],
    provider: &P,
    params: &BasketParams,
) -> Result<BatchResult, PassError> {
    let started_at = Utc::now();

    let reference_trend = fetch_reference_trend(reference_symbol, provider, params)
        .await
        .map_err(|source| PassError::Reference {
            symbol: reference_symbol.to_string(),
            source,
        })?;
    debug!(symbol = reference_symbol, trend = %reference_trend, "reference trend");

    let pending = tracked_symbols
        .iter()
        .filter(|s| s.as_str() != reference_symbol)
        .map(|symbol| async move {
            let outcome = evaluate_instrument(symbol, reference_trend, provider, params).await;
            if let Err(e) = &outcome {
                warn!(symbol = %symbol, "analysis failed: {}", e);
            }
            InstrumentOutcome {
                symbol: symbol.clone(),
                outcome,
            }
        });

    Ok(BatchResult {
        started_at,
        reference_symbol: reference_symbol.to_string(),
        reference_trend,
        entries: join_all(pending).await,
    })
}

async fn fetch_reference_trend<P: CandleProvider + ?Sized>(
    symbol: &str,
    provider: &P,
    params: &BasketParams,
) -> Result<Trend, AnalysisError> {
    let candles = provider
        .fetch(symbol, Interval::ShortTerm, params.candle_limit)
        .await?;
    Ok(reference_trend(&candles, &params.strategy)?)
}

async fn evaluate_instrument<P: CandleProvider + ?Sized>(
    symbol: &str,
    reference_trend: Trend,
    provider: &P,
    params: &BasketParams,
) -> Result<AnalysisResult, AnalysisError> {
    let (short, confirmation) = try_join(
        provider.fetch(symbol, Interval::ShortTerm, params.candle_limit),
        provider.fetch(symbol, Interval::Confirmation, params.candle_limit),
    )
    .await?;

    Ok(analyze(
        symbol,
        &short,
        &confirmation,
        reference_trend,
        &params.strategy,
    )?)
}
