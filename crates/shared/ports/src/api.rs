use async_trait::async_trait;
use hermes_core::{
    AuthenticateRequest, InputOrder, LoginRequest, OrderAction, QueryRequest,
    SettlementConfirmRequest, TransferRequest,
};

use crate::error::SubmitResult;

/// Port for the external trading gateway
///
/// Every method hands a request to the gateway and returns as soon as it
/// has been accepted or throttled. Results arrive later as
/// [`GatewayEvent`](crate::GatewayEvent)s on the event sink the gateway was
/// built with.
///
/// Contract: implementations must be safe to call from any task, and must
/// emit events one at a time, in the order the gateway produced them.
#[async_trait]
pub trait TraderApi: Send + Sync {
    /// Open the connection to a front; answered by `FrontConnected`
    async fn connect(&self, front: &str);

    async fn authenticate(&self, req: &AuthenticateRequest) -> SubmitResult;

    /// Answered by `RspUserLogin` carrying the session identity
    async fn login(&self, req: &LoginRequest) -> SubmitResult;

    async fn confirm_settlement(&self, req: &SettlementConfirmRequest) -> SubmitResult;

    /// Answered by zero or more streamed records and one `is_last` record
    async fn query(&self, req: &QueryRequest) -> SubmitResult;

    async fn submit_order(&self, order: &InputOrder) -> SubmitResult;

    async fn cancel_order(&self, action: &OrderAction) -> SubmitResult;

    async fn transfer_bank_to_future(&self, req: &TransferRequest) -> SubmitResult;

    async fn transfer_future_to_bank(&self, req: &TransferRequest) -> SubmitResult;

    /// Get the gateway's name for logging
    fn name(&self) -> &str {
        "TraderApi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure the trait is object-safe
    fn _assert_trader_api_object_safe(_: &dyn TraderApi) {}
}
