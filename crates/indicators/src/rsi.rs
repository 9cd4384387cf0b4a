use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::IndicatorError;

/// RSI по Уайлдеру: `closes.len() - period` значений, выровнены по правому краю.
///
/// Первые avg gain/loss = простое среднее первых `period` изменений, дальше
/// сглаживание Уайлдера. Нет потерь -> 100, нет роста -> 0.
/// Значения округляются до 2 знаков.
pub fn rsi(period: usize, closes: &[f64]) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::ZeroPeriod { indicator: "RSI" });
    }

    if closes.len() < period + 1 {
        return Err(IndicatorError::InsufficientData {
            indicator: "RSI",
            required: period + 1,
            actual: closes.len(),
        });
    }

    let p = period as f64;
    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let (seed, rest) = changes.split_at(period);
    let mut avg_gain = seed.iter().map(|&c| c.max(0.0)).sum::<f64>() / p;
    let mut avg_loss = seed.iter().map(|&c| (-c).max(0.0)).sum::<f64>() / p;

    let mut out = Vec::with_capacity(changes.len() - period + 1);
    out.push(rsi_value(avg_gain, avg_loss));

    for &c in rest {
        avg_gain = (avg_gain * (p - 1.0) + c.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-c).max(0.0)) / p;
        out.push(rsi_value(avg_gain, avg_loss));
    }

    Ok(out)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    if avg_gain == 0.0 {
        return 0.0;
    }

    let rs = avg_gain / avg_loss;
    round2((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}

// округляем точное десятичное значение double, половину вверх:
// 70.00499999999999545 -> 70.00, а не 70.01 как через `* 100.0`
fn round2(v: f64) -> f64 {
    Decimal::from_f64_retain(v)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_hand_computed_wilder_values() {
        // changes: +1 +1 -1 -1 +1
        let out = rsi(3, &[1.0, 2.0, 3.0, 2.0, 1.0, 2.0]).unwrap();
        assert_eq!(out, vec![66.67, 44.44, 62.96]);
    }

    #[test]
    fn five_period_reference_series() {
        let closes = [44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84];
        let out = rsi(5, &closes).unwrap();
        assert_eq!(out, vec![61.84, 67.19, 72.83, 78.81]);
    }

    #[test]
    fn only_gains_reads_100_only_losses_reads_0() {
        assert_eq!(rsi(2, &[10.0, 11.0, 12.0, 13.0]).unwrap(), vec![100.0, 100.0]);
        assert_eq!(rsi(2, &[13.0, 12.0, 11.0, 10.0]).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn flat_window_counts_as_no_losses() {
        assert_eq!(rsi(3, &[5.0; 6]).unwrap(), vec![100.0; 3]);
    }

    #[test]
    fn needs_period_plus_one_closes() {
        assert_eq!(
            rsi(5, &[1.0; 5]),
            Err(IndicatorError::InsufficientData {
                indicator: "RSI",
                required: 6,
                actual: 5,
            })
        );
    }

    #[test]
    fn band_edges_round_on_the_exact_decimal() {
        // 70.005 и 65.005 как double лежат чуть ниже половины цента
        assert_eq!(round2(70.005), 70.0);
        assert_eq!(round2(65.005), 65.0);
        assert_eq!(round2(30.005), 30.0);
    }

    #[test]
    fn exact_halves_round_up() {
        // 0.125 и 64.375 представимы точно
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(64.375), 64.38);
        assert_eq!(round2(72.344), 72.34);
    }

    proptest! {
        #[test]
        fn values_stay_within_bounds(
            period in 1usize..15,
            closes in prop::collection::vec(1.0f64..1_000.0, 16..80),
        ) {
            let out = rsi(period, &closes).unwrap();
            prop_assert_eq!(out.len(), closes.len() - period);
            prop_assert!(out.iter().all(|v| (0.0..=100.0).contains(v)));
        }
    }
}
