use crate::candle::{Candle, closes, volumes};
use crate::ema::ema;
use crate::error::IndicatorError;
use crate::rsi::rsi;
use crate::trend::{Trend, classify_trend};
use crate::volume::trailing_volume_average;

/// Периоды индикаторов
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndicatorParams {
    pub ema_fast: usize, // 9
    pub ema_slow: usize, // 21
    pub rsi_period: usize, // 5
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            rsi_period: 5,
        }
    }
}

/// Индикаторы одного таймфрейма. Серии выровнены по правому краю:
/// последний элемент относится к последней свече.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub rsi: Vec<f64>,
    pub avg_volume: f64,
}

impl IndicatorSet {
    pub fn compute(candles: &[Candle], params: IndicatorParams) -> Result<Self, IndicatorError> {
        Self::from_series(&closes(candles), &volumes(candles), params)
    }

    pub fn from_series(
        closes: &[f64],
        volumes: &[f64],
        params: IndicatorParams,
    ) -> Result<Self, IndicatorError> {
        Ok(Self {
            ema_fast: ema(params.ema_fast, closes)?,
            ema_slow: ema(params.ema_slow, closes)?,
            rsi: rsi(params.rsi_period, closes)?,
            avg_volume: trailing_volume_average(volumes)?,
        })
    }

    pub fn trend(&self) -> Result<Trend, IndicatorError> {
        classify_trend(&self.ema_fast, &self.ema_slow)
    }

    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Price, Qty, TimestampMs};

    fn series(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle {
                open_time: TimestampMs(i as i64 * 60_000),
                close_time: TimestampMs(i as i64 * 60_000 + 59_999),
                open: Price(c),
                high: Price(c),
                low: Price(c),
                close: Price(c),
                volume: Qty(10.0),
            })
            .collect()
    }

    #[test]
    fn series_are_shortened_by_warm_up() {
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        let set = IndicatorSet::compute(&series(&closes), IndicatorParams::default()).unwrap();

        assert_eq!(set.ema_fast.len(), 92);
        assert_eq!(set.ema_slow.len(), 80);
        assert_eq!(set.rsi.len(), 95);
        assert_eq!(set.avg_volume, 10.0);
        assert_eq!(set.trend(), Ok(Trend::Up));
        assert_eq!(set.latest_rsi(), Some(100.0));
    }

    #[test]
    fn flat_prices_are_sideways() {
        let set = IndicatorSet::compute(&series(&[50.0; 40]), IndicatorParams::default()).unwrap();
        assert_eq!(set.trend(), Ok(Trend::Sideways));
    }

    #[test]
    fn short_history_fails_on_slow_ema() {
        let err = IndicatorSet::compute(&series(&[1.0; 20]), IndicatorParams::default()).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: "EMA",
                required: 21,
                actual: 20,
            }
        );
    }

    #[test]
    fn slow_ema_with_one_value_cannot_give_trend() {
        let set = IndicatorSet::compute(&series(&[1.0; 21]), IndicatorParams::default()).unwrap();
        assert!(set.trend().is_err());
    }
}
