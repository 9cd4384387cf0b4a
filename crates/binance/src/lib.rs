pub mod rest;

pub use rest::{BinanceError, BinanceRest};
