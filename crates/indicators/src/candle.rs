use std::fmt;
use std::str::FromStr;

use types::{Price, Qty, TimestampMs};

use crate::error::{CandleError, ParseTimeframeError};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Candle {
    pub open_time: TimestampMs,
    pub close_time: TimestampMs,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Qty,
}

impl Candle {
    /// Проверка одной свечи: значения конечные и >= 0, high/low покрывают тело,
    /// close_time позже open_time
    pub fn validate(&self, index: usize) -> Result<(), CandleError> {
        let prices = [self.open, self.high, self.low, self.close];
        if !prices.iter().all(|p| p.is_valid()) || !self.volume.is_valid() {
            return Err(CandleError::InvalidValue { index });
        }

        let body_lo = self.open.0.min(self.close.0);
        let body_hi = self.open.0.max(self.close.0);
        if self.low.0 > body_lo || self.high.0 < body_hi {
            return Err(CandleError::InvalidRange { index });
        }

        if self.close_time <= self.open_time {
            return Err(CandleError::InvalidSpan { index });
        }

        Ok(())
    }
}

/// Проверка всех свечей и порядка (от старых к новым)
pub fn validate_series(candles: &[Candle]) -> Result<(), CandleError> {
    for (i, c) in candles.iter().enumerate() {
        c.validate(i)?;

        if i > 0 && c.open_time <= candles[i - 1].open_time {
            return Err(CandleError::OutOfOrder { index: i });
        }
    }

    Ok(())
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close.0).collect()
}

pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume.0).collect()
}

//
// --- Timeframe ---------------------------------------------------------------
//

/// Таймфрейм свечей, метки как у бирж (15m, 1h, ...)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::Min1,
        Timeframe::Min5,
        Timeframe::Min15,
        Timeframe::Min30,
        Timeframe::Hour1,
        Timeframe::Hour4,
        Timeframe::Day1,
    ];

    pub fn as_millis(self) -> i64 {
        match self {
            Timeframe::Min1 => 60_000,
            Timeframe::Min5 => 5 * 60_000,
            Timeframe::Min15 => 15 * 60_000,
            Timeframe::Min30 => 30 * 60_000,
            Timeframe::Hour1 => 60 * 60_000,
            Timeframe::Hour4 => 4 * 60 * 60_000,
            Timeframe::Day1 => 24 * 60 * 60_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Min1 => "1m",
            Timeframe::Min5 => "5m",
            Timeframe::Min15 => "15m",
            Timeframe::Min30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Day1 => "1d",
        }
    }

    /// Первая граница бара строго после `now` (от epoch, UTC)
    pub fn next_boundary(self, now: TimestampMs) -> TimestampMs {
        let step = self.as_millis();
        TimestampMs((now.0.div_euclid(step) + 1) * step)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.label() == s)
            .ok_or_else(|| ParseTimeframeError(s.to_string()))
    }
}
