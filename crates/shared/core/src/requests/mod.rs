//! Outbound request value types
//!
//! What the orchestration layer hands to the external gateway. Field
//! encoding to the wire is the gateway's business.

use serde::{Deserialize, Serialize};

use crate::entities::{
    AccountRegister, Direction, OffsetFlag, Order, OrderPolicy, PriceType, TimeCondition,
    VolumeCondition,
};
use crate::values::{Amount, FrontId, InstrumentId, OrderRef, Price, SessionId, Volume};

/// Client authentication (app id + auth code)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub broker_id: String,
    pub user_id: String,
    pub app_id: String,
    pub auth_code: String,
}

/// User login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub broker_id: String,
    pub user_id: String,
    pub password: String,
}

/// Settlement statement confirmation for an investor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfirmRequest {
    pub broker_id: String,
    pub investor_id: String,
}

/// Streamed query families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    Investor,
    Instrument,
    Order,
    Trade,
    AccountRegister,
    Position,
    PositionDetail,
    TradingAccount,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Instrument => "instrument",
            Self::Order => "order",
            Self::Trade => "trade",
            Self::AccountRegister => "account_register",
            Self::Position => "position",
            Self::PositionDetail => "position_detail",
            Self::TradingAccount => "trading_account",
        }
    }

    /// Reference-data queries populate the long-lived caches
    pub fn is_reference_data(&self) -> bool {
        matches!(
            self,
            Self::Investor | Self::Instrument | Self::Order | Self::Trade | Self::AccountRegister
        )
    }
}

/// A streamed query scoped to one investor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub kind: QueryKind,
    pub broker_id: String,
    pub investor_id: String,
}

/// Order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputOrder {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub order_ref: OrderRef,
    pub direction: Direction,
    pub offset: OffsetFlag,
    pub price_type: PriceType,
    pub limit_price: Price,
    pub volume: Volume,
    pub time_condition: TimeCondition,
    pub volume_condition: VolumeCondition,
    pub min_volume: Volume,
}

impl InputOrder {
    /// Build a submission for one of the named placement policies
    ///
    /// `limit_price` is carried verbatim; tick alignment is the caller's job.
    #[allow(clippy::too_many_arguments)]
    pub fn with_policy(
        policy: OrderPolicy,
        broker_id: impl Into<String>,
        investor_id: impl Into<String>,
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        order_ref: impl Into<OrderRef>,
        direction: Direction,
        offset: OffsetFlag,
        limit_price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            broker_id: broker_id.into(),
            investor_id: investor_id.into(),
            instrument_id: instrument_id.into(),
            exchange_id: exchange_id.into(),
            order_ref: order_ref.into(),
            direction,
            offset,
            price_type: policy.price_type(),
            limit_price,
            volume,
            time_condition: policy.time_condition(),
            volume_condition: policy.volume_condition(),
            min_volume: 1,
        }
    }
}

/// Delete request for a previously observed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAction {
    pub broker_id: String,
    pub investor_id: String,
    pub exchange_id: String,
    pub instrument_id: InstrumentId,
    pub order_ref: OrderRef,
    pub front_id: FrontId,
    pub session_id: SessionId,
    pub order_sys_id: String,
}

impl OrderAction {
    /// Cancel the order exactly as the gateway last reported it
    pub fn delete(order: &Order) -> Self {
        Self {
            broker_id: order.broker_id.clone(),
            investor_id: order.investor_id.clone(),
            exchange_id: order.exchange_id.clone(),
            instrument_id: order.instrument_id.clone(),
            order_ref: order.order_ref.clone(),
            front_id: order.front_id,
            session_id: order.session_id,
            order_sys_id: order.order_sys_id.clone(),
        }
    }
}

/// Direction of a bank/futures fund transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    BankToFuture,
    FutureToBank,
}

/// Fund transfer between a registered bank account and the futures account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub direction: TransferDirection,
    pub broker_id: String,
    pub bank_id: String,
    pub bank_branch_id: String,
    pub bank_account: String,
    /// Only required when moving money out of the bank
    pub bank_password: Option<String>,
    pub account_id: String,
    pub account_password: String,
    pub currency_id: String,
    pub amount: Amount,
}

impl TransferRequest {
    pub fn bank_to_future(
        register: &AccountRegister,
        bank_password: impl Into<String>,
        account_password: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::from_register(
            TransferDirection::BankToFuture,
            register,
            Some(bank_password.into()),
            account_password.into(),
            amount,
        )
    }

    pub fn future_to_bank(
        register: &AccountRegister,
        account_password: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::from_register(
            TransferDirection::FutureToBank,
            register,
            None,
            account_password.into(),
            amount,
        )
    }

    fn from_register(
        direction: TransferDirection,
        register: &AccountRegister,
        bank_password: Option<String>,
        account_password: String,
        amount: Amount,
    ) -> Self {
        Self {
            direction,
            broker_id: register.broker_id.clone(),
            bank_id: register.bank_id.clone(),
            bank_branch_id: register.bank_branch_id.clone(),
            bank_account: register.bank_account.clone(),
            bank_password,
            account_id: register.account_id.clone(),
            account_password,
            currency_id: register.currency_id.clone(),
            amount,
        }
    }
}
