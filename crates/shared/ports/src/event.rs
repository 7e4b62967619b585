use hermes_core::{
    AccountRegister, InputOrder, Instrument, Investor, LoginInfo, Order, OrderAction, Position,
    PositionDetail, QueryKind, RspInfo, Trade, TradingAccount, TransferDirection,
};
use serde::{Deserialize, Serialize};

/// One page of a streamed query response
///
/// A query produces any number of pages; the page with `is_last` set closes
/// the round. A page may carry no record (empty result) and the closing page
/// may carry an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub record: Option<T>,
    pub rsp: Option<RspInfo>,
    pub is_last: bool,
}

impl<T> Paged<T> {
    pub fn record(record: T, is_last: bool) -> Self {
        Self {
            record: Some(record),
            rsp: None,
            is_last,
        }
    }

    /// Closing page of an empty result
    pub fn empty() -> Self {
        Self {
            record: None,
            rsp: None,
            is_last: true,
        }
    }

    /// Closing page carrying an error
    pub fn failed(rsp: RspInfo) -> Self {
        Self {
            record: None,
            rsp: Some(rsp),
            is_last: true,
        }
    }

    /// The error carried by this page, if any
    pub fn error(&self) -> Option<&RspInfo> {
        RspInfo::error(self.rsp.as_ref())
    }
}

/// Final report of a fund transfer broadcast by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    pub direction: TransferDirection,
    pub bank_account: String,
    pub account_id: String,
    pub amount: hermes_core::Amount,
    pub rsp: RspInfo,
}

/// Every asynchronous callback the gateway can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GatewayEvent {
    FrontConnected,
    FrontDisconnected {
        reason: i32,
    },
    RspAuthenticate {
        rsp: RspInfo,
    },
    RspUserLogin {
        login: Option<LoginInfo>,
        rsp: RspInfo,
    },
    RspSettlementConfirm {
        rsp: RspInfo,
    },

    RspQryInvestor(Paged<Investor>),
    RspQryInstrument(Paged<Instrument>),
    RspQryOrder(Paged<Order>),
    RspQryTrade(Paged<Trade>),
    RspQryAccountRegister(Paged<AccountRegister>),
    RspQryPosition(Paged<Position>),
    RspQryPositionDetail(Paged<PositionDetail>),
    RspQryTradingAccount(Paged<TradingAccount>),

    /// Synchronous rejection of an order submission
    RspOrderInsert {
        input: InputOrder,
        rsp: RspInfo,
    },
    /// Broadcast order state; repeated over the order's lifetime
    RtnOrder(Order),
    /// Broadcast execution
    RtnTrade(Trade),
    /// Rejection of a cancellation
    RspOrderAction {
        action: OrderAction,
        rsp: RspInfo,
    },

    /// Synchronous answer to a transfer request
    RspTransfer {
        direction: TransferDirection,
        rsp: RspInfo,
        is_last: bool,
    },
    /// Broadcast transfer outcome
    RtnTransfer(TransferReport),
}

impl GatewayEvent {
    /// The query family of a streamed response, if this is one
    pub fn query_kind(&self) -> Option<QueryKind> {
        match self {
            Self::RspQryInvestor(_) => Some(QueryKind::Investor),
            Self::RspQryInstrument(_) => Some(QueryKind::Instrument),
            Self::RspQryOrder(_) => Some(QueryKind::Order),
            Self::RspQryTrade(_) => Some(QueryKind::Trade),
            Self::RspQryAccountRegister(_) => Some(QueryKind::AccountRegister),
            Self::RspQryPosition(_) => Some(QueryKind::Position),
            Self::RspQryPositionDetail(_) => Some(QueryKind::PositionDetail),
            Self::RspQryTradingAccount(_) => Some(QueryKind::TradingAccount),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_error() {
        let ok: Paged<Investor> = Paged::empty();
        assert!(ok.error().is_none());
        assert!(ok.is_last);

        let zero = Paged::<Investor> {
            record: None,
            rsp: Some(RspInfo::ok()),
            is_last: true,
        };
        assert!(zero.error().is_none());

        let failed: Paged<Investor> = Paged::failed(RspInfo::new(90, "query too fast"));
        assert_eq!(failed.error().map(|r| r.error_id), Some(90));
    }

    #[test]
    fn test_query_kind() {
        let event = GatewayEvent::RspQryPosition(Paged::empty());
        assert_eq!(event.query_kind(), Some(QueryKind::Position));
        assert_eq!(GatewayEvent::FrontConnected.query_kind(), None);
    }
}
