//! Core domain types.
//!
//! Цель:
//! - никаких "голых" f64 для цен и объёмов вне математики индикаторов
//! - единицы измерения зафиксированы на уровне типов
//! - время нельзя перепутать с ценой

use std::fmt;

/// Цена инструмента (например ETH/USDT)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Price(pub f64);

/// Объём в базовом активе (volume свечи)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Qty(pub f64);

/// Время в миллисекундах (unix epoch)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampMs(pub i64);

impl Price {
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Qty {
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

//
// --- Display (для логов / алертов) ------------------------------------------
//

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
