use std::time::Duration;

use indicators::candle::validate_series;
use indicators::{Candle, CandleError, Timeframe};
use serde_json::Value;
use thiserror::Error;
use types::{Price, Qty, TimestampMs};

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Максимальный limit у klines
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum BinanceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad kline row {row}: {reason}")]
    BadRow { row: usize, reason: String },

    #[error("invalid candles: {0}")]
    InvalidCandles(#[from] CandleError),
}

#[derive(Clone)]
pub struct BinanceRest {
    client: reqwest::Client,
    base: String,
}

impl BinanceRest {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, BinanceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Последние `limit` свечей, от старых к новым. Последняя обычно
    /// ещё формируется.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, BinanceError> {
        let url = format!("{}/api/v3/klines", self.base);
        let limit = limit.clamp(1, MAX_LIMIT).to_string();

        let rows: Vec<Vec<Value>> = self
            .client
            .get(url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.label()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_klines(&rows)
    }
}

/// Формат строки:
/// `[openTime, "open", "high", "low", "close", "volume", closeTime, ...]`,
/// хвост игнорируем.
pub fn parse_klines(rows: &[Vec<Value>]) -> Result<Vec<Candle>, BinanceError> {
    let candles = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_row(i, row))
        .collect::<Result<Vec<_>, _>>()?;

    validate_series(&candles)?;
    Ok(candles)
}

fn parse_row(i: usize, row: &[Value]) -> Result<Candle, BinanceError> {
    if row.len() < 7 {
        return Err(BinanceError::BadRow {
            row: i,
            reason: format!("expected at least 7 fields, got {}", row.len()),
        });
    }

    Ok(Candle {
        open_time: TimestampMs(int_field(i, &row[0])?),
        open: Price(decimal_field(i, &row[1])?),
        high: Price(decimal_field(i, &row[2])?),
        low: Price(decimal_field(i, &row[3])?),
        close: Price(decimal_field(i, &row[4])?),
        volume: Qty(decimal_field(i, &row[5])?),
        close_time: TimestampMs(int_field(i, &row[6])?),
    })
}

fn int_field(row: usize, v: &Value) -> Result<i64, BinanceError> {
    v.as_i64().ok_or_else(|| BinanceError::BadRow {
        row,
        reason: format!("expected integer timestamp, got {}", v),
    })
}

// decimal приходят строками (точность)
fn decimal_field(row: usize, v: &Value) -> Result<f64, BinanceError> {
    let parsed = match v {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    parsed.ok_or_else(|| BinanceError::BadRow {
        row,
        reason: format!("expected decimal, got {}", v),
    })
}
