use thiserror::Error;

/// Не хватает данных для расчёта индикатора
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("{indicator} needs at least {required} samples, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{indicator} period must be positive")]
    ZeroPeriod { indicator: &'static str },
}

/// Свечи не прошли валидацию
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandleError {
    #[error("candle {index}: negative or non-finite value")]
    InvalidValue { index: usize },

    #[error("candle {index}: high/low do not bound open/close")]
    InvalidRange { index: usize },

    #[error("candle {index}: close time is not after open time")]
    InvalidSpan { index: usize },

    #[error("candle {index}: open time is not strictly increasing")]
    OutOfOrder { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported interval: {0}")]
pub struct ParseTimeframeError(pub String);
