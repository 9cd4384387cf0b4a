pub mod types;

pub use types::{Price, Qty, TimestampMs};
