pub mod candle;
pub mod ema;
pub mod error;
pub mod rsi;
pub mod set;
pub mod trend;
pub mod volume;

pub use candle::{Candle, Timeframe};
pub use error::{CandleError, IndicatorError, ParseTimeframeError};
pub use set::{IndicatorParams, IndicatorSet};
pub use trend::{Trend, classify_trend};
