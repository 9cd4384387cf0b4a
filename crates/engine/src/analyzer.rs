use indicators::{Candle, IndicatorError, IndicatorSet, Trend};
use policy::{Signal, SignalPolicyInput, SignalReason, signal_policy_decision};
use types::{Price, Qty};

use crate::config::StrategyParams;

/// Результат анализа инструмента. Заполняется полностью и при `None`,
/// чтобы было видно, почему сигнала нет.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub symbol: String,
    /// Последний close (short TF)
    pub price: Price,
    /// Последний RSI (short TF)
    pub rsi: f64,
    /// Последний volume (short TF)
    pub volume: Qty,
    /// База, с которой сравнивали объём закрытого бара
    pub avg_volume: Qty,
    pub volume_above_average: bool,
    pub short_term_trend: Trend,
    pub confirmation_trend: Trend,
    pub signal: Signal,
    pub reason: SignalReason,
}

/// Стратегия для одного инструмента.
///
/// Тренд и проверка объёма смотрят на предпоследний бар:
/// последний ещё не закрыт.
pub fn analyze(
    symbol: &str,
    short: &[Candle],
    confirmation: &[Candle],
    reference_trend: Trend,
    params: &StrategyParams,
) -> Result<AnalysisResult, IndicatorError> {
    let short_set = IndicatorSet::compute(short, params.indicators)?;
    let confirmation_set = IndicatorSet::compute(confirmation, params.indicators)?;

    let short_term_trend = short_set.trend()?;
    let confirmation_trend = confirmation_set.trend()?;

    let (Some(latest), Some(settled), Some(rsi)) = (
        short.last(),
        short.len().checked_sub(2).map(|i| &short[i]),
        short_set.latest_rsi(),
    ) else {
        return Err(IndicatorError::InsufficientData {
            indicator: "short timeframe",
            required: 2,
            actual: short.len(),
        });
    };

    let volume_above_average = settled.volume.0 > short_set.avg_volume;
    let confirmed = confirmation_trend == short_term_trend && short_term_trend != Trend::Sideways;

    let decision = signal_policy_decision(
        SignalPolicyInput {
            reference_trend,
            short_term_trend,
            rsi,
            volume_above_average,
            confirmed,
        },
        params.signal,
    );

    Ok(AnalysisResult {
        symbol: symbol.to_string(),
        price: latest.close,
        rsi,
        volume: latest.volume,
        avg_volume: Qty(short_set.avg_volume),
        volume_above_average,
        short_term_trend,
        confirmation_trend,
        signal: decision.signal,
        reason: decision.reason,
    })
}

/// Тренд бенчмарка по short-свечам
pub fn reference_trend(candles: &[Candle], params: &StrategyParams) -> Result<Trend, IndicatorError> {
    IndicatorSet::compute(candles, params.indicators)?.trend()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn params() -> StrategyParams {
        StrategyParams::default()
    }

    #[test]
    fn oversold_pullback_in_confirmed_uptrend_is_long() {
        let short = candles(&rising_with_pullback(), 50.0);
        let confirmation = candles(&rising(), 10.0);

        let r = analyze("ETHUSDT", &short, &confirmation, Trend::Up, &params()).unwrap();

        assert_eq!(r.symbol, "ETHUSDT");
        assert_eq!(r.short_term_trend, Trend::Up);
        assert_eq!(r.confirmation_trend, Trend::Up);
        assert_eq!(r.rsi, 8.88);
        assert!(r.volume_above_average);
        assert_eq!(r.avg_volume, Qty(10.0));
        assert_eq!(r.price, Price(169.0));
        assert_eq!(r.volume, Qty(10.0));
        assert_eq!(r.signal, Signal::Long);
        assert_eq!(r.reason, SignalReason::Oversold);
    }

    #[test]
    fn shallow_pullback_is_watching() {
        let short = candles(&rising_with_shallow_pullback(), 50.0);
        let confirmation = candles(&rising(), 10.0);

        let r = analyze("SOLUSDT", &short, &confirmation, Trend::Up, &params()).unwrap();

        assert_eq!(r.rsi, 31.62);
        assert_eq!(r.signal, Signal::Watching);
        assert_eq!(r.reason, SignalReason::WatchingLong);
    }

    #[test]
    fn overbought_bounce_in_confirmed_downtrend_is_short() {
        let short = candles(&falling_with_bounce(), 50.0);
        let confirmation = candles(&falling(), 10.0);

        let r = analyze("XRPUSDT", &short, &confirmation, Trend::Down, &params()).unwrap();

        assert_eq!(r.short_term_trend, Trend::Down);
        assert_eq!(r.rsi, 91.12);
        assert_eq!(r.signal, Signal::Short);
    }

    #[test]
    fn only_the_settled_bar_volume_counts() {
        // всплеск на последнем баре, закрытый бар на уровне базы
        let mut short = candles(&rising_with_pullback(), 10.0);
        if let Some(last) = short.last_mut() {
            last.volume = Qty(1_000.0);
        }
        let confirmation = candles(&rising(), 10.0);

        let r = analyze("ETHUSDT", &short, &confirmation, Trend::Up, &params()).unwrap();

        assert!(!r.volume_above_average);
        assert_eq!(r.volume, Qty(1_000.0));
        assert_eq!(r.signal, Signal::None);
        assert_eq!(r.rsi, 8.88);
    }

    #[test]
    fn disagreeing_confirmation_blocks_signal() {
        let short = candles(&rising_with_pullback(), 50.0);
        let confirmation = candles(&falling(), 10.0);

        let r = analyze("ETHUSDT", &short, &confirmation, Trend::Up, &params()).unwrap();

        assert_eq!(r.confirmation_trend, Trend::Down);
        assert_eq!(r.signal, Signal::None);
    }

    #[test]
    fn sideways_market_never_confirms() {
        let flat = candles(&[100.0; 60], 50.0);

        let r = analyze("TRXUSDT", &flat, &flat, Trend::Sideways, &params()).unwrap();

        assert_eq!(r.short_term_trend, Trend::Sideways);
        assert_eq!(r.confirmation_trend, Trend::Sideways);
        assert_eq!(r.rsi, 100.0);
        assert_eq!(r.signal, Signal::None);
    }

    #[test]
    fn short_confirmation_history_fails() {
        let short = candles(&rising(), 50.0);
        let confirmation = candles(&rising()[..15], 10.0);

        let err = analyze("ADAUSDT", &short, &confirmation, Trend::Up, &params()).unwrap_err();

        assert!(matches!(err, IndicatorError::InsufficientData { indicator: "EMA", .. }));
    }

    #[test]
    fn reference_trend_reads_short_candles() {
        assert_eq!(reference_trend(&candles(&rising(), 10.0), &params()), Ok(Trend::Up));
        assert_eq!(reference_trend(&candles(&falling(), 10.0), &params()), Ok(Trend::Down));
    }
}
