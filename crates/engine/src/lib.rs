pub mod alert;
pub mod analyzer;
pub mod basket;
pub mod config;
pub mod driver;
pub mod feed;
pub mod render;
pub mod report;
pub mod sink;

pub use analyzer::{AnalysisResult, analyze};
pub use basket::{AnalysisError, BatchResult, InstrumentOutcome, PassError, evaluate_basket};
pub use config::{MonitorConfig, StrategyParams};
pub use driver::run_pass;
pub use feed::{BinanceFeed, CandleProvider, FetchError, Interval, TimeframePair};
pub use sink::{AlertSink, NotifyError};
