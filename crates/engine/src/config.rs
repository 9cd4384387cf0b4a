use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use indicators::{IndicatorParams, Timeframe};
use policy::SignalParams;

use crate::basket::BasketParams;
use crate::feed::TimeframePair;

pub const DEFAULT_SYMBOLS: [&str; 9] = [
    "BTCUSDT", "ETHUSDT", "XRPUSDT", "BNBUSDT", "SOLUSDT", "TRXUSDT", "ADAUSDT", "LINKUSDT",
    "AVAXUSDT",
];

/// Константы стратегии: EMA 9/21, RSI(5), полосы 30/35/65/70
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct StrategyParams {
    pub indicators: IndicatorParams,
    pub signal: SignalParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub symbols: Vec<String>,
    pub reference_symbol: String,
    pub timeframes: TimeframePair,
    pub candle_limit: usize,
    pub binance_base_url: String,
    pub http_timeout: Duration,
    pub telegram: Option<TelegramConfig>,
    pub bind_addr: String,
    pub strategy: StrategyParams,
}

//
// --- env ---------------------------------------------------------------------
//

impl MonitorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Конфиг из произвольного lookup; пустые / незаданные ключи -> дефолты
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let symbols = match get("SYMBOLS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };

        let reference_symbol = get("REFERENCE_SYMBOL")
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_else(|| "BTCUSDT".to_string());

        let short: Timeframe = get("SHORT_INTERVAL")
            .as_deref()
            .unwrap_or("15m")
            .parse()
            .context("invalid SHORT_INTERVAL")?;
        let confirmation: Timeframe = get("CONFIRMATION_INTERVAL")
            .as_deref()
            .unwrap_or("1h")
            .parse()
            .context("invalid CONFIRMATION_INTERVAL")?;

        let candle_limit: usize = get("CANDLE_LIMIT")
            .as_deref()
            .unwrap_or("100")
            .trim()
            .parse()
            .context("invalid CANDLE_LIMIT")?;
        if candle_limit == 0 {
            anyhow::bail!("CANDLE_LIMIT must be > 0");
        }

        let timeout_secs: u64 = get("HTTP_TIMEOUT_SECS")
            .as_deref()
            .unwrap_or("10")
            .trim()
            .parse()
            .context("invalid HTTP_TIMEOUT_SECS")?;

        let telegram = match (get("TELEGRAM_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig { token, chat_id }),
            _ => None,
        };

        Ok(Self {
            symbols,
            reference_symbol,
            timeframes: TimeframePair {
                short,
                confirmation,
            },
            candle_limit,
            binance_base_url: get("BINANCE_BASE_URL")
                .unwrap_or_else(|| binance::rest::DEFAULT_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            telegram,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            strategy: StrategyParams::default(),
        })
    }

    pub fn basket_params(&self) -> BasketParams {
        BasketParams {
            candle_limit: self.candle_limit,
            strategy: self.strategy,
        }
    }
}
