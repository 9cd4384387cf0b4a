use crate::error::IndicatorError;

/// Инкрементальная EMA: первые `period` значений дают SMA-seed,
/// дальше сглаживание с `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct EmaCalc {
    period: usize,
    alpha: f64,
    seed_sum: f64,
    seen: usize,
    value: Option<f64>,
}

impl EmaCalc {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::ZeroPeriod { indicator: "EMA" });
        }

        Ok(Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            seed_sum: 0.0,
            seen: 0,
            value: None,
        })
    }

    /// Обновление на каждом close. `None`, пока копится seed
    pub fn update(&mut self, x: f64) -> Option<f64> {
        let next = match self.value {
            Some(v) => v + self.alpha * (x - v),
            None => {
                self.seed_sum += x;
                self.seen += 1;
                if self.seen < self.period {
                    return None;
                }
                self.seed_sum / self.period as f64
            }
        };

        self.value = Some(next);
        Some(next)
    }
}

/// Серия EMA длиной `closes.len() - period + 1`,
/// последнее значение соответствует последнему close.
pub fn ema(period: usize, closes: &[f64]) -> Result<Vec<f64>, IndicatorError> {
    let mut calc = EmaCalc::new(period)?;

    if closes.len() < period {
        return Err(IndicatorError::InsufficientData {
            indicator: "EMA",
            required: period,
            actual: closes.len(),
        });
    }

    Ok(closes.iter().filter_map(|&x| calc.update(x)).collect())
}
