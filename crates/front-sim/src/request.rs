use hermes_core::{
    AuthenticateRequest, InputOrder, LoginRequest, OrderAction, QueryKind, QueryRequest,
    SettlementConfirmRequest, TransferRequest,
};

/// A request the simulated front accepted, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Connect(String),
    Authenticate(AuthenticateRequest),
    Login(LoginRequest),
    ConfirmSettlement(SettlementConfirmRequest),
    Query(QueryRequest),
    SubmitOrder(InputOrder),
    CancelOrder(OrderAction),
    Transfer(TransferRequest),
}

impl Request {
    /// Short label, handy for asserting on request order
    pub fn label(&self) -> String {
        match self {
            Request::Connect(_) => "connect".to_string(),
            Request::Authenticate(_) => "authenticate".to_string(),
            Request::Login(_) => "login".to_string(),
            Request::ConfirmSettlement(_) => "confirm_settlement".to_string(),
            Request::Query(req) => format!("query_{}", req.kind.as_str()),
            Request::SubmitOrder(_) => "submit_order".to_string(),
            Request::CancelOrder(_) => "cancel_order".to_string(),
            Request::Transfer(_) => "transfer".to_string(),
        }
    }

    pub fn query_kind(&self) -> Option<QueryKind> {
        match self {
            Request::Query(req) => Some(req.kind),
            _ => None,
        }
    }
}
