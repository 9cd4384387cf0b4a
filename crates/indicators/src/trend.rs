use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// Направление по паре fast/slow EMA
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Sideways => "sideways",
        })
    }
}

/// Сравнивает предпоследние значения серий. Последний бар ещё формируется,
/// для тренда не используется.
pub fn classify_trend(ema_fast: &[f64], ema_slow: &[f64]) -> Result<Trend, IndicatorError> {
    let (Some(fast), Some(slow)) = (settled(ema_fast), settled(ema_slow)) else {
        return Err(IndicatorError::InsufficientData {
            indicator: "trend",
            required: 2,
            actual: ema_fast.len().min(ema_slow.len()),
        });
    };

    Ok(if fast > slow {
        Trend::Up
    } else if fast < slow {
        Trend::Down
    } else {
        Trend::Sideways
    })
}

fn settled(series: &[f64]) -> Option<f64> {
    series.len().checked_sub(2).map(|i| series[i])
}
