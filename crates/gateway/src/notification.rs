//! Notifications published to subscribers of a trading session

use hermes_core::{Order, OrderAction, RspInfo, Trade};
use hermes_ports::TransferReport;
use serde::{Deserialize, Serialize};

/// Asynchronous session updates fanned out on the notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// Every order update, from any session
    Order(Order),
    /// Every execution, from any session
    Trade(Trade),
    /// A cancellation was refused
    ActionRejected { action: OrderAction, rsp: RspInfo },
    /// Final outcome of a fund transfer
    Transfer(TransferReport),
    /// The connection to the front dropped
    Disconnected { reason: i32 },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Order(_) => "order",
            Notification::Trade(_) => "trade",
            Notification::ActionRejected { .. } => "action_rejected",
            Notification::Transfer(_) => "transfer",
            Notification::Disconnected { .. } => "disconnected",
        }
    }
}
