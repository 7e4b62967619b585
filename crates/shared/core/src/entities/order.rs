use serde::{Deserialize, Serialize};

use super::{Direction, OffsetFlag, OrderStatus, PriceType, TimeCondition, VolumeCondition};
use crate::requests::InputOrder;
use crate::values::{FrontId, InstrumentId, OrderLocalId, OrderRef, Price, SessionId, Volume};

/// Order as broadcast by the gateway
///
/// An order is reported many times over its lifetime; each report replaces
/// the previous one in the order cache, keyed by `local_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    /// Client-side handle, unique per session
    pub local_id: OrderLocalId,
    /// Client-chosen reference echoed back from the submission
    pub order_ref: OrderRef,
    pub front_id: FrontId,
    pub session_id: SessionId,
    pub direction: Direction,
    pub offset: OffsetFlag,
    pub price_type: PriceType,
    pub time_condition: TimeCondition,
    pub volume_condition: VolumeCondition,
    pub limit_price: Price,
    pub volume: Volume,
    pub volume_traded: Volume,
    pub status: OrderStatus,
    /// Exchange-assigned identifier, empty until accepted by the exchange
    pub order_sys_id: String,
    pub status_msg: String,
    pub insert_time: String,
}

impl Order {
    /// First report of a submission, before the exchange has seen it
    pub fn from_input(
        input: &InputOrder,
        local_id: impl Into<OrderLocalId>,
        front_id: FrontId,
        session_id: SessionId,
    ) -> Self {
        Self {
            broker_id: input.broker_id.clone(),
            investor_id: input.investor_id.clone(),
            instrument_id: input.instrument_id.clone(),
            exchange_id: input.exchange_id.clone(),
            local_id: local_id.into(),
            order_ref: input.order_ref.clone(),
            front_id,
            session_id,
            direction: input.direction,
            offset: input.offset,
            price_type: input.price_type,
            time_condition: input.time_condition,
            volume_condition: input.volume_condition,
            limit_price: input.limit_price,
            volume: input.volume,
            volume_traded: 0,
            status: OrderStatus::Unknown,
            order_sys_id: String::new(),
            status_msg: String::new(),
            insert_time: String::new(),
        }
    }

    /// Remaining volume to be filled
    pub fn volume_remaining(&self) -> Volume {
        self.volume.saturating_sub(self.volume_traded)
    }

    /// Returns true once the exchange has assigned its identifier
    pub fn is_accepted(&self) -> bool {
        !self.order_sys_id.is_empty()
    }
}
