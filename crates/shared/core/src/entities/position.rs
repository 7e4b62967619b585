use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, PositionDirection};
use crate::values::{InstrumentId, Price, Volume};

/// Aggregated position of one investor in one instrument and direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub direction: PositionDirection,
    /// Total open volume
    pub position: Volume,
    /// Portion opened during the current trading day
    pub today_position: Volume,
    /// Portion carried over from previous days
    pub yd_position: Volume,
    pub position_cost: Decimal,
    pub open_cost: Decimal,
    pub use_margin: Decimal,
    pub position_profit: Decimal,
    pub close_profit: Decimal,
}

/// One open lot as recorded at opening time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDetail {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub direction: Direction,
    pub open_date: String,
    pub trade_id: String,
    pub volume: Volume,
    pub open_price: Price,
    pub margin: Decimal,
    pub close_volume: Volume,
}

impl Position {
    /// Average open price per lot, `None` when flat
    pub fn average_cost(&self, multiplier: Decimal) -> Option<Price> {
        if self.position == 0 || multiplier.is_zero() {
            return None;
        }
        Some(self.open_cost / (Decimal::from(self.position) * multiplier))
    }
}
