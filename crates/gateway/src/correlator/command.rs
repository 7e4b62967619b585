use hermes_core::{
    LoginInfo, OrderLocalId, OrderRef, Position, PositionDetail, QueryKind, RspInfo,
    TradingAccount,
};
use tokio::sync::oneshot;

use super::cache::SessionCache;

/// Result slot carried by every rendezvous: exactly one of value or error
pub(crate) type Outcome<T> = Result<T, RspInfo>;

/// Progress reported through the signal slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Signal {
    Connected,
    Authenticated,
    LoggedIn(LoginInfo),
    SettlementConfirmed,
    /// A reference-data query completed and its records are cached
    Loaded(QueryKind),
    /// A transient query completed
    Snapshot(Snapshot),
}

/// Records of a completed transient query, frozen at the closing page
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Snapshot {
    Positions(Vec<Position>),
    PositionDetails(Vec<PositionDetail>),
    TradingAccounts(Vec<TradingAccount>),
}

impl Snapshot {
    pub(crate) fn kind(&self) -> QueryKind {
        match self {
            Snapshot::Positions(_) => QueryKind::Position,
            Snapshot::PositionDetails(_) => QueryKind::PositionDetail,
            Snapshot::TradingAccounts(_) => QueryKind::TradingAccount,
        }
    }
}

pub(crate) type CacheRead = Box<dyn FnOnce(&SessionCache) + Send>;

/// Requests from the client to the correlator
pub(crate) enum Command {
    /// Arm the signal slot; with `query` set, only that query's completion
    /// or a disconnect reaches the waiter
    WaitSignal {
        query: Option<QueryKind>,
        reply: oneshot::Sender<Outcome<Signal>>,
    },
    /// Wait for the placement carrying `order_ref`
    WaitOrder {
        order_ref: OrderRef,
        reply: oneshot::Sender<Outcome<OrderLocalId>>,
    },
    /// Arm the transfer slot
    WaitTransfer(oneshot::Sender<Outcome<()>>),
    /// Reset the accumulator of a query about to be issued
    BeginQuery(QueryKind),
    /// Run a closure against the cache
    Read(CacheRead),
    Shutdown,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::WaitSignal { query: None, .. } => write!(f, "WaitSignal"),
            Command::WaitSignal {
                query: Some(kind), ..
            } => write!(f, "WaitSignal({})", kind.as_str()),
            Command::WaitOrder { order_ref, .. } => write!(f, "WaitOrder({})", order_ref),
            Command::WaitTransfer(_) => write!(f, "WaitTransfer"),
            Command::BeginQuery(kind) => write!(f, "BeginQuery({})", kind.as_str()),
            Command::Read(_) => write!(f, "Read"),
            Command::Shutdown => write!(f, "Shutdown"),
        }
    }
}
