//! Hermes Core Domain
//!
//! Pure domain types for the Hermes futures gateway layer: the records the
//! gateway streams back, the requests sent to it, and tick arithmetic.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod requests;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    AccountRegister, Direction, Investor, LoginInfo, OffsetFlag, Order, OrderPolicy, OrderStatus,
    Position, PositionDetail, PositionDirection, PriceType, RspInfo, Session, TimeCondition,
    Trade, TradingAccount, VolumeCondition,
};
pub use instruments::{Instrument, ProductClass, is_tick_aligned, round_to_tick};
pub use requests::{
    AuthenticateRequest, InputOrder, LoginRequest, OrderAction, QueryKind, QueryRequest,
    SettlementConfirmRequest, TransferDirection, TransferRequest,
};
pub use values::{
    Amount, FrontId, InstrumentId, OrderLocalId, OrderRef, Price, SessionId, Volume,
};
