use serde::{Deserialize, Serialize};

use super::{Direction, OffsetFlag, Order};
use crate::values::{InstrumentId, OrderLocalId, OrderRef, Price, Volume};

/// An execution against an order
///
/// Trades are append-only and keyed by the owning order's local identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub trade_id: String,
    pub local_id: OrderLocalId,
    pub order_ref: OrderRef,
    pub order_sys_id: String,
    pub direction: Direction,
    pub offset: OffsetFlag,
    pub price: Price,
    pub volume: Volume,
    pub trade_date: String,
    pub trade_time: String,
}

impl Trade {
    /// An execution of `volume` at `price` against `order`
    pub fn against(
        order: &Order,
        trade_id: impl Into<String>,
        price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            broker_id: order.broker_id.clone(),
            investor_id: order.investor_id.clone(),
            instrument_id: order.instrument_id.clone(),
            exchange_id: order.exchange_id.clone(),
            trade_id: trade_id.into(),
            local_id: order.local_id.clone(),
            order_ref: order.order_ref.clone(),
            order_sys_id: order.order_sys_id.clone(),
            direction: order.direction,
            offset: order.offset,
            price,
            volume,
            trade_date: String::new(),
            trade_time: String::new(),
        }
    }
}
