use hermes_core::{
    AccountRegister, Instrument, Investor, LoginInfo, Order, Position, PositionDetail, Price,
    QueryKind, RspInfo, Trade, TradingAccount,
};
use std::collections::{HashMap, HashSet};

use crate::fixtures;

/// How the front answers an order submission
#[derive(Debug, Clone, PartialEq)]
pub enum OrderMode {
    /// Report the order, then report it resting on the book
    Accept,
    /// Accept, then fill completely at the order's limit price
    Fill,
    /// Refuse the submission with this error
    Reject(RspInfo),
    /// Accept the submission and never answer
    Silent,
}

/// How the front answers a fund transfer
#[derive(Debug, Clone, PartialEq)]
pub enum TransferMode {
    /// Synchronous response followed by the broadcast, both carrying `rsp`
    Respond(RspInfo),
    /// Only the broadcast, carrying `rsp`
    BroadcastOnly(RspInfo),
    /// Accept the request and never answer
    Silent,
}

/// Scripted behaviour of a simulated front
#[derive(Debug, Clone)]
pub struct FrontScript {
    /// Answer `connect` with `FrontConnected`
    pub answer_connect: bool,
    pub login: LoginInfo,
    pub auth_error: Option<RspInfo>,
    pub login_error: Option<RspInfo>,
    pub settlement_error: Option<RspInfo>,

    pub investors: Vec<Investor>,
    pub instruments: Vec<Instrument>,
    pub orders: Vec<Order>,
    pub trades: Vec<Trade>,
    pub account_registers: Vec<AccountRegister>,
    pub positions: Vec<Position>,
    pub position_details: Vec<PositionDetail>,
    pub trading_accounts: Vec<TradingAccount>,

    /// Close the query round with this error instead of records
    pub query_errors: HashMap<QueryKind, RspInfo>,
    /// Accept the query and never answer
    pub silent_queries: HashSet<QueryKind>,
    /// Number of times each query kind is throttled before being accepted
    pub query_throttles: HashMap<QueryKind, u32>,

    pub order_mode: OrderMode,
    /// Number of order submissions throttled before being accepted
    pub order_throttles: u32,
    /// Refuse every cancellation with this error
    pub cancel_error: Option<RspInfo>,
    pub transfer_mode: TransferMode,
    /// Price used when filling market orders
    pub market_price: Price,
}

impl Default for FrontScript {
    fn default() -> Self {
        Self {
            answer_connect: true,
            login: fixtures::login_info(),
            auth_error: None,
            login_error: None,
            settlement_error: None,
            investors: vec![fixtures::investor()],
            instruments: vec![fixtures::if2409(), fixtures::rb2410()],
            orders: Vec::new(),
            trades: Vec::new(),
            account_registers: vec![fixtures::account_register()],
            positions: vec![fixtures::long_position()],
            position_details: vec![fixtures::position_detail()],
            trading_accounts: vec![fixtures::trading_account()],
            query_errors: HashMap::new(),
            silent_queries: HashSet::new(),
            query_throttles: HashMap::new(),
            order_mode: OrderMode::Accept,
            order_throttles: 0,
            cancel_error: None,
            transfer_mode: TransferMode::Respond(RspInfo::ok()),
            market_price: rust_decimal_macros::dec!(3005),
        }
    }
}

impl FrontScript {
    pub fn throttle_query(mut self, kind: QueryKind, times: u32) -> Self {
        self.query_throttles.insert(kind, times);
        self
    }

    pub fn fail_query(mut self, kind: QueryKind, rsp: RspInfo) -> Self {
        self.query_errors.insert(kind, rsp);
        self
    }

    pub fn silence_query(mut self, kind: QueryKind) -> Self {
        self.silent_queries.insert(kind);
        self
    }

    pub fn with_order_mode(mut self, mode: OrderMode) -> Self {
        self.order_mode = mode;
        self
    }

    pub fn with_transfer_mode(mut self, mode: TransferMode) -> Self {
        self.transfer_mode = mode;
        self
    }
}
