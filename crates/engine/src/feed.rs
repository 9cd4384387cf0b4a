use async_trait::async_trait;
use binance::BinanceRest;
use indicators::{Candle, Timeframe};
use thiserror::Error;

/// Роль серии свечей в стратегии
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Interval {
    ShortTerm,
    Confirmation,
}

/// Таймфреймы за ролями (по умолчанию 15m / 1h)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeframePair {
    pub short: Timeframe,
    pub confirmation: Timeframe,
}

impl TimeframePair {
    pub fn resolve(self, interval: Interval) -> Timeframe {
        match interval {
            Interval::ShortTerm => self.short,
            Interval::Confirmation => self.confirmation,
        }
    }
}

impl Default for TimeframePair {
    fn default() -> Self {
        Self {
            short: Timeframe::Min15,
            confirmation: Timeframe::Hour1,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("data unavailable for {symbol} ({interval:?}): {reason}")]
    DataUnavailable {
        symbol: String,
        interval: Interval,
        reason: String,
    },
}

/// Источник свечей (от старых к новым). Без ретраев: ошибка fetch
/// окончательна для серии в текущем проходе.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError>;
}

/// Binance REST behind the provider seam.
#[derive(Clone)]
pub struct BinanceFeed {
    rest: BinanceRest,
    timeframes: TimeframePair,
}

impl BinanceFeed {
    pub fn new(rest: BinanceRest, timeframes: TimeframePair) -> Self {
        Self { rest, timeframes }
    }
}

#[async_trait]
impl CandleProvider for BinanceFeed {
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let timeframe = self.timeframes.resolve(interval);

        self.rest
            .get_klines(symbol, timeframe, limit)
            .await
            .map_err(|e| FetchError::DataUnavailable {
                symbol: symbol.to_string(),
                interval,
                reason: e.to_string(),
            })
    }
}
