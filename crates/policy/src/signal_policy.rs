use std::fmt;

use indicators::Trend;
use serde::{Deserialize, Serialize};

/// Сигнал по инструменту за один проход
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    None,
    Watching,
    Long,
    Short,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::None => "none",
            Signal::Watching => "watching",
            Signal::Long => "long",
            Signal::Short => "short",
        })
    }
}

/// Причина сигнала (для логов / алертов)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalReason {
    NoSignal,
    WatchingLong,
    WatchingShort,
    Oversold,
    Overbought,
}

/// Полосы RSI. Long: наблюдение в `[long_entry, long_watch)`, вход ниже
/// `long_entry`. Short: наблюдение в `(short_watch, short_entry]`, вход
/// выше `short_entry`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SignalParams {
    pub long_entry: f64,  // 30
    pub long_watch: f64,  // 35
    pub short_watch: f64, // 65
    pub short_entry: f64, // 70
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            long_entry: 30.0,
            long_watch: 35.0,
            short_watch: 65.0,
            short_entry: 70.0,
        }
    }
}

/// Вход для принятия решения
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SignalPolicyInput {
    pub reference_trend: Trend,
    pub short_term_trend: Trend,
    pub rsi: f64,
    pub volume_above_average: bool,
    pub confirmed: bool,
}

impl SignalPolicyInput {
    fn aligned(&self, trend: Trend) -> bool {
        self.reference_trend == trend
            && self.short_term_trend == trend
            && self.volume_above_average
            && self.confirmed
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SignalDecision {
    pub signal: Signal,
    pub reason: SignalReason,
}

struct Rule {
    priority: u8,
    decision: SignalDecision,
    matches: fn(&SignalPolicyInput, &SignalParams) -> bool,
}

/// Отсортировано по priority. Каждое сработавшее правило перезаписывает
/// предыдущее: вход всегда важнее наблюдения.
const RULES: [Rule; 4] = [
    Rule {
        priority: 1,
        decision: SignalDecision {
            signal: Signal::Watching,
            reason: SignalReason::WatchingLong,
        },
        matches: |i, p| i.aligned(Trend::Up) && i.rsi >= p.long_entry && i.rsi < p.long_watch,
    },
    Rule {
        priority: 1,
        decision: SignalDecision {
            signal: Signal::Watching,
            reason: SignalReason::WatchingShort,
        },
        matches: |i, p| i.aligned(Trend::Down) && i.rsi > p.short_watch && i.rsi <= p.short_entry,
    },
    Rule {
        priority: 2,
        decision: SignalDecision {
            signal: Signal::Long,
            reason: SignalReason::Oversold,
        },
        matches: |i, p| i.aligned(Trend::Up) && i.rsi < p.long_entry,
    },
    Rule {
        priority: 2,
        decision: SignalDecision {
            signal: Signal::Short,
            reason: SignalReason::Overbought,
        },
        matches: |i, p| i.aligned(Trend::Down) && i.rsi > p.short_entry,
    },
];

const NO_SIGNAL: SignalDecision = SignalDecision {
    signal: Signal::None,
    reason: SignalReason::NoSignal,
};

pub fn signal_policy_decision(input: SignalPolicyInput, params: SignalParams) -> SignalDecision {
    debug_assert!(RULES.windows(2).all(|w| w[0].priority <= w[1].priority));

    RULES
        .iter()
        .filter(|rule| (rule.matches)(&input, &params))
        .fold(NO_SIGNAL, |_, rule| rule.decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_side(rsi: f64) -> SignalPolicyInput {
        SignalPolicyInput {
            reference_trend: Trend::Up,
            short_term_trend: Trend::Up,
            rsi,
            volume_above_average: true,
            confirmed: true,
        }
    }

    fn short_side(rsi: f64) -> SignalPolicyInput {
        SignalPolicyInput {
            reference_trend: Trend::Down,
            short_term_trend: Trend::Down,
            rsi,
            volume_above_average: true,
            confirmed: true,
        }
    }

    fn signal(input: SignalPolicyInput) -> Signal {
        signal_policy_decision(input, SignalParams::default()).signal
    }

    #[test]
    fn oversold_in_confirmed_uptrend_is_long() {
        let d = signal_policy_decision(long_side(25.0), SignalParams::default());
        assert_eq!(d.signal, Signal::Long);
        assert_eq!(d.reason, SignalReason::Oversold);
    }

    #[test]
    fn overbought_in_confirmed_downtrend_is_short() {
        let d = signal_policy_decision(short_side(72.0), SignalParams::default());
        assert_eq!(d.signal, Signal::Short);
        assert_eq!(d.reason, SignalReason::Overbought);
    }

    #[test]
    fn long_side_bands_in_descending_rsi_order() {
        let seen: Vec<Signal> = [40.0, 35.0, 34.99, 30.0, 29.99, 5.0]
            .into_iter()
            .map(|r| signal(long_side(r)))
            .collect();

        assert_eq!(
            seen,
            vec![
                Signal::None,
                Signal::None,
                Signal::Watching,
                Signal::Watching,
                Signal::Long,
                Signal::Long,
            ]
        );
    }

    #[test]
    fn short_side_bands_in_ascending_rsi_order() {
        let seen: Vec<Signal> = [60.0, 65.0, 65.01, 70.0, 70.01, 95.0]
            .into_iter()
            .map(|r| signal(short_side(r)))
            .collect();

        assert_eq!(
            seen,
            vec![
                Signal::None,
                Signal::None,
                Signal::Watching,
                Signal::Watching,
                Signal::Short,
                Signal::Short,
            ]
        );
    }

    #[test]
    fn watching_reason_names_the_side() {
        let long = signal_policy_decision(long_side(32.0), SignalParams::default());
        let short = signal_policy_decision(short_side(68.0), SignalParams::default());
        assert_eq!(long.reason, SignalReason::WatchingLong);
        assert_eq!(short.reason, SignalReason::WatchingShort);
    }

    #[test]
    fn reference_trend_gates_the_signal() {
        let mut input = long_side(10.0);
        input.reference_trend = Trend::Down;
        assert_eq!(signal(input), Signal::None);

        input.reference_trend = Trend::Sideways;
        assert_eq!(signal(input), Signal::None);
    }

    #[test]
    fn requires_volume_and_confirmation() {
        let mut input = short_side(90.0);
        input.volume_above_average = false;
        assert_eq!(signal(input), Signal::None);

        let mut input = short_side(90.0);
        input.confirmed = false;
        assert_eq!(signal(input), Signal::None);
    }

    #[test]
    fn oversold_rsi_in_downtrend_is_nothing() {
        assert_eq!(signal(short_side(10.0)), Signal::None);
        assert_eq!(signal(long_side(90.0)), Signal::None);
    }

    #[test]
    fn same_input_same_decision() {
        let input = long_side(31.0);
        let first = signal_policy_decision(input, SignalParams::default());
        let second = signal_policy_decision(input, SignalParams::default());
        assert_eq!(first, second);
    }
}
