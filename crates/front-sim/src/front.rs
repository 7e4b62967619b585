use async_trait::async_trait;
use hermes_core::{
    AuthenticateRequest, InputOrder, LoginRequest, Order, OrderAction, OrderRef, OrderStatus,
    QueryKind, QueryRequest, RspInfo, SettlementConfirmRequest, Trade, TransferDirection,
    TransferRequest,
};
use hermes_ports::{
    EventSink, GatewayEvent, Paged, SubmitResult, Throttled, TraderApi, TransferReport,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::request::Request;
use crate::script::{FrontScript, OrderMode, TransferMode};

/// Submission return code of a throttled request
const THROTTLED: i32 = -3;

#[derive(Default)]
struct SimState {
    /// Accepted requests, in arrival order
    requests: Vec<Request>,
    /// Throttled submissions, in arrival order
    throttled: Vec<Request>,
    query_throttles: HashMap<QueryKind, u32>,
    order_throttles: u32,
    /// Orders this front has reported, keyed by order reference
    orders: HashMap<OrderRef, Order>,
    next_local_id: u64,
    next_trade_id: u64,
    next_sys_id: u64,
}

/// Scripted trading front
///
/// Answers are emitted synchronously, before the submitting call returns.
pub struct FrontSim {
    sink: Arc<dyn EventSink>,
    script: FrontScript,
    state: Mutex<SimState>,
}

impl FrontSim {
    pub fn new(sink: Arc<dyn EventSink>, script: FrontScript) -> Self {
        let state = SimState {
            query_throttles: script.query_throttles.clone(),
            order_throttles: script.order_throttles,
            ..SimState::default()
        };
        Self {
            sink,
            script,
            state: Mutex::new(state),
        }
    }

    pub fn script(&self) -> &FrontScript {
        &self.script
    }

    /// Every accepted request so far
    pub async fn requests(&self) -> Vec<Request> {
        self.state.lock().await.requests.clone()
    }

    /// Labels of every accepted request so far
    pub async fn request_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .map(Request::label)
            .collect()
    }

    /// Every throttled submission so far
    pub async fn throttled(&self) -> Vec<Request> {
        self.state.lock().await.throttled.clone()
    }

    /// Push an unsolicited callback, as another session or the exchange would
    pub fn inject(&self, event: GatewayEvent) {
        self.emit(event);
    }

    /// Fill `volume` of a resting order at `price`, reporting trade then order
    pub async fn fill(&self, order_ref: &str, price: hermes_core::Price, volume: u32) -> bool {
        let mut state = self.state.lock().await;
        state.next_trade_id += 1;
        let trade_id = state.next_trade_id.to_string();
        let Some(order) = state.orders.get_mut(order_ref) else {
            return false;
        };

        order.volume_traded = (order.volume_traded + volume).min(order.volume);
        order.status = if order.volume_remaining() == 0 {
            OrderStatus::AllTraded
        } else {
            OrderStatus::PartTradedQueueing
        };
        let trade = Trade::against(order, trade_id, price, volume);
        let update = order.clone();
        drop(state);

        self.emit(GatewayEvent::RtnTrade(trade));
        self.emit(GatewayEvent::RtnOrder(update));
        true
    }

    fn emit(&self, event: GatewayEvent) {
        if let Err(e) = self.sink.emit(event) {
            warn!("Front simulator could not deliver callback: {}", e);
        }
    }

    fn emit_pages<T: Clone>(&self, records: &[T], wrap: fn(Paged<T>) -> GatewayEvent) {
        if records.is_empty() {
            self.emit(wrap(Paged::empty()));
            return;
        }
        let last = records.len() - 1;
        for (i, record) in records.iter().enumerate() {
            self.emit(wrap(Paged::record(record.clone(), i == last)));
        }
    }

    async fn accept(&self, request: Request) {
        debug!("Front simulator accepted {}", request.label());
        self.state.lock().await.requests.push(request);
    }

    /// Report a new order resting on the book
    async fn open_order(&self, input: &InputOrder) -> Order {
        let mut state = self.state.lock().await;
        state.next_local_id += 1;
        state.next_sys_id += 1;
        let mut order = Order::from_input(
            input,
            format!("{:>12}", state.next_local_id),
            self.script.login.front_id,
            self.script.login.session_id,
        );
        self.emit(GatewayEvent::RtnOrder(order.clone()));

        order.status = OrderStatus::NoTradeQueueing;
        order.order_sys_id = format!("{:>12}", state.next_sys_id);
        state.orders.insert(order.order_ref.clone(), order.clone());
        self.emit(GatewayEvent::RtnOrder(order.clone()));
        order
    }

    fn answer_transfer(&self, req: &TransferRequest) {
        let report = |rsp: &RspInfo| TransferReport {
            direction: req.direction,
            bank_account: req.bank_account.clone(),
            account_id: req.account_id.clone(),
            amount: req.amount,
            rsp: rsp.clone(),
        };
        match &self.script.transfer_mode {
            TransferMode::Respond(rsp) => {
                self.emit(GatewayEvent::RspTransfer {
                    direction: req.direction,
                    rsp: rsp.clone(),
                    is_last: true,
                });
                self.emit(GatewayEvent::RtnTransfer(report(rsp)));
            }
            TransferMode::BroadcastOnly(rsp) => {
                self.emit(GatewayEvent::RtnTransfer(report(rsp)));
            }
            TransferMode::Silent => {}
        }
    }

    async fn transfer(&self, req: &TransferRequest, expected: TransferDirection) -> SubmitResult {
        if req.direction != expected {
            warn!("Transfer request direction mismatch: {:?}", req.direction);
        }
        self.accept(Request::Transfer(req.clone())).await;
        self.answer_transfer(req);
        Ok(())
    }
}

#[async_trait]
impl TraderApi for FrontSim {
    async fn connect(&self, front: &str) {
        info!("Front simulator connecting to {}", front);
        self.accept(Request::Connect(front.to_string())).await;
        if self.script.answer_connect {
            self.emit(GatewayEvent::FrontConnected);
        }
    }

    async fn authenticate(&self, req: &AuthenticateRequest) -> SubmitResult {
        self.accept(Request::Authenticate(req.clone())).await;
        let rsp = self.script.auth_error.clone().unwrap_or_default();
        self.emit(GatewayEvent::RspAuthenticate { rsp });
        Ok(())
    }

    async fn login(&self, req: &LoginRequest) -> SubmitResult {
        self.accept(Request::Login(req.clone())).await;
        let event = match &self.script.login_error {
            Some(rsp) => GatewayEvent::RspUserLogin {
                login: None,
                rsp: rsp.clone(),
            },
            None => GatewayEvent::RspUserLogin {
                login: Some(self.script.login.clone()),
                rsp: RspInfo::ok(),
            },
        };
        self.emit(event);
        Ok(())
    }

    async fn confirm_settlement(&self, req: &SettlementConfirmRequest) -> SubmitResult {
        self.accept(Request::ConfirmSettlement(req.clone())).await;
        let rsp = self.script.settlement_error.clone().unwrap_or_default();
        self.emit(GatewayEvent::RspSettlementConfirm { rsp });
        Ok(())
    }

    async fn query(&self, req: &QueryRequest) -> SubmitResult {
        {
            let mut state = self.state.lock().await;
            let remaining = state.query_throttles.get(&req.kind).copied().unwrap_or(0);
            if remaining > 0 {
                state.query_throttles.insert(req.kind, remaining - 1);
                state.throttled.push(Request::Query(req.clone()));
                debug!("Front simulator throttled {} query", req.kind.as_str());
                return Err(Throttled(THROTTLED));
            }
        }
        self.accept(Request::Query(req.clone())).await;

        if self.script.silent_queries.contains(&req.kind) {
            return Ok(());
        }
        if let Some(rsp) = self.script.query_errors.get(&req.kind) {
            let failed = rsp.clone();
            let event = match req.kind {
                QueryKind::Investor => GatewayEvent::RspQryInvestor(Paged::failed(failed)),
                QueryKind::Instrument => GatewayEvent::RspQryInstrument(Paged::failed(failed)),
                QueryKind::Order => GatewayEvent::RspQryOrder(Paged::failed(failed)),
                QueryKind::Trade => GatewayEvent::RspQryTrade(Paged::failed(failed)),
                QueryKind::AccountRegister => {
                    GatewayEvent::RspQryAccountRegister(Paged::failed(failed))
                }
                QueryKind::Position => GatewayEvent::RspQryPosition(Paged::failed(failed)),
                QueryKind::PositionDetail => {
                    GatewayEvent::RspQryPositionDetail(Paged::failed(failed))
                }
                QueryKind::TradingAccount => {
                    GatewayEvent::RspQryTradingAccount(Paged::failed(failed))
                }
            };
            self.emit(event);
            return Ok(());
        }

        let script = &self.script;
        match req.kind {
            QueryKind::Investor => self.emit_pages(&script.investors, GatewayEvent::RspQryInvestor),
            QueryKind::Instrument => {
                self.emit_pages(&script.instruments, GatewayEvent::RspQryInstrument)
            }
            QueryKind::Order => self.emit_pages(&script.orders, GatewayEvent::RspQryOrder),
            QueryKind::Trade => self.emit_pages(&script.trades, GatewayEvent::RspQryTrade),
            QueryKind::AccountRegister => self.emit_pages(
                &script.account_registers,
                GatewayEvent::RspQryAccountRegister,
            ),
            QueryKind::Position => self.emit_pages(&script.positions, GatewayEvent::RspQryPosition),
            QueryKind::PositionDetail => self.emit_pages(
                &script.position_details,
                GatewayEvent::RspQryPositionDetail,
            ),
            QueryKind::TradingAccount => self.emit_pages(
                &script.trading_accounts,
                GatewayEvent::RspQryTradingAccount,
            ),
        }
        Ok(())
    }

    async fn submit_order(&self, order: &InputOrder) -> SubmitResult {
        {
            let mut state = self.state.lock().await;
            if state.order_throttles > 0 {
                state.order_throttles -= 1;
                state.throttled.push(Request::SubmitOrder(order.clone()));
                return Err(Throttled(THROTTLED));
            }
        }
        self.accept(Request::SubmitOrder(order.clone())).await;

        match &self.script.order_mode {
            OrderMode::Accept => {
                self.open_order(order).await;
            }
            OrderMode::Fill => {
                let resting = self.open_order(order).await;
                let price = if resting.price_type == hermes_core::PriceType::Any {
                    self.script.market_price
                } else {
                    resting.limit_price
                };
                self.fill(&resting.order_ref, price, resting.volume).await;
            }
            OrderMode::Reject(rsp) => {
                self.emit(GatewayEvent::RspOrderInsert {
                    input: order.clone(),
                    rsp: rsp.clone(),
                });
            }
            OrderMode::Silent => {}
        }
        Ok(())
    }

    async fn cancel_order(&self, action: &OrderAction) -> SubmitResult {
        self.accept(Request::CancelOrder(action.clone())).await;

        if let Some(rsp) = &self.script.cancel_error {
            self.emit(GatewayEvent::RspOrderAction {
                action: action.clone(),
                rsp: rsp.clone(),
            });
            return Ok(());
        }

        let cancelled = {
            let mut state = self.state.lock().await;
            state.orders.get_mut(&action.order_ref).map(|order| {
                order.status = OrderStatus::Canceled;
                order.status_msg = "cancelled".to_string();
                order.clone()
            })
        };
        match cancelled {
            Some(order) => self.emit(GatewayEvent::RtnOrder(order)),
            None => self.emit(GatewayEvent::RspOrderAction {
                action: action.clone(),
                rsp: RspInfo::new(25, "order not found"),
            }),
        }
        Ok(())
    }

    async fn transfer_bank_to_future(&self, req: &TransferRequest) -> SubmitResult {
        self.transfer(req, TransferDirection::BankToFuture).await
    }

    async fn transfer_future_to_bank(&self, req: &TransferRequest) -> SubmitResult {
        self.transfer(req, TransferDirection::FutureToBank).await
    }

    fn name(&self) -> &str {
        "FrontSim"
    }
}
