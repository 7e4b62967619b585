use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Accepted locally, not yet acknowledged by the exchange
    Unknown,
    /// Resting, nothing traded
    NoTradeQueueing,
    /// Not resting, nothing traded
    NoTradeNotQueueing,
    /// Partially traded, remainder resting
    PartTradedQueueing,
    /// Partially traded, remainder gone
    PartTradedNotQueueing,
    /// Completely traded
    AllTraded,
    Canceled,
    /// Conditional order waiting for its trigger
    NotTouched,
    /// Conditional order triggered
    Touched,
}

impl OrderStatus {
    /// Returns true if no further updates are expected
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::AllTraded
                | OrderStatus::Canceled
                | OrderStatus::PartTradedNotQueueing
                | OrderStatus::NoTradeNotQueueing
        )
    }

    /// Returns true if the order can still be cancelled
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Unknown
                | OrderStatus::NoTradeQueueing
                | OrderStatus::PartTradedQueueing
                | OrderStatus::NotTouched
        )
    }
}
