//! Event correlator
//!
//! A single task that owns every cache and every rendezvous slot. It
//! consumes gateway callbacks and client commands from one queue, in order,
//! so no state is ever shared between tasks:
//!
//! - handshake and query progress is delivered through the signal slot
//! - query completions only reach a waiter armed for that query kind
//! - the first same-session update of an order completes the placement
//!   waiting on its order reference; any number of placements may wait
//! - transfer responses and broadcasts complete the transfer slot
//! - every order, trade, rejected cancel and transfer outcome is published
//!   as a [`Notification`]

mod cache;
mod command;

pub use cache::SessionCache;
pub(crate) use command::{CacheRead, Command, Outcome, Signal, Snapshot};

use crate::accumulator::{Accumulator, Round};
use crate::notification::Notification;
use crate::rendezvous::{Delivery, Rendezvous, Waiters};
use crate::transport::Publisher;
use crate::transport::channel::ChannelPublisher;
use crate::transport::queue::Inbound;
use hermes_core::{
    AccountRegister, Instrument, Investor, Order, OrderLocalId, Position, PositionDetail,
    QueryKind, RspInfo, Session, Trade, TradingAccount,
};
use hermes_ports::GatewayEvent;
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

/// Per-family page buffers
struct Accumulators {
    investors: Accumulator<Investor>,
    instruments: Accumulator<Instrument>,
    orders: Accumulator<Order>,
    trades: Accumulator<Trade>,
    account_registers: Accumulator<AccountRegister>,
    positions: Accumulator<Position>,
    position_details: Accumulator<PositionDetail>,
    trading_accounts: Accumulator<TradingAccount>,
}

impl Accumulators {
    fn new() -> Self {
        Self {
            investors: Accumulator::new(QueryKind::Investor),
            instruments: Accumulator::new(QueryKind::Instrument),
            orders: Accumulator::new(QueryKind::Order),
            trades: Accumulator::new(QueryKind::Trade),
            account_registers: Accumulator::new(QueryKind::AccountRegister),
            positions: Accumulator::new(QueryKind::Position),
            position_details: Accumulator::new(QueryKind::PositionDetail),
            trading_accounts: Accumulator::new(QueryKind::TradingAccount),
        }
    }

    fn begin(&mut self, kind: QueryKind) {
        match kind {
            QueryKind::Investor => self.investors.begin(),
            QueryKind::Instrument => self.instruments.begin(),
            QueryKind::Order => self.orders.begin(),
            QueryKind::Trade => self.trades.begin(),
            QueryKind::AccountRegister => self.account_registers.begin(),
            QueryKind::Position => self.positions.begin(),
            QueryKind::PositionDetail => self.position_details.begin(),
            QueryKind::TradingAccount => self.trading_accounts.begin(),
        }
    }
}

pub(crate) struct Correlator {
    /// Front address, recorded in the session on login
    front: String,
    cache: SessionCache,
    accumulators: Accumulators,
    signal: Rendezvous<Outcome<Signal>>,
    orders: Waiters<Outcome<OrderLocalId>>,
    transfer: Rendezvous<Outcome<()>>,
    notifications: ChannelPublisher<Notification>,
}

impl Correlator {
    pub(crate) fn new(front: impl Into<String>, notifications: ChannelPublisher<Notification>) -> Self {
        Self {
            front: front.into(),
            cache: SessionCache::default(),
            accumulators: Accumulators::new(),
            signal: Rendezvous::new("signal"),
            orders: Waiters::new("order"),
            transfer: Rendezvous::new("transfer"),
            notifications,
        }
    }

    /// Consume the inbound queue until shutdown or until every sender is gone
    pub(crate) async fn run(mut self, mut rx: UnboundedReceiver<Inbound>) {
        info!("Correlator started for front {}", self.front);

        while let Some(inbound) = rx.recv().await {
            match inbound {
                Inbound::Event(event) => self.on_event(event).await,
                Inbound::Command(Command::Shutdown) => break,
                Inbound::Command(command) => self.on_command(command),
            }
        }

        info!("Correlator stopped");
    }

    pub(crate) fn on_command(&mut self, command: Command) {
        debug!("Command: {:?}", command);
        match command {
            Command::WaitSignal { query: None, reply } => self.signal.arm(reply),
            Command::WaitSignal {
                query: Some(kind),
                reply,
            } => self.signal.arm_tagged(kind.as_str(), reply),
            Command::WaitOrder { order_ref, reply } => {
                if !self.orders.arm(order_ref.clone(), reply) {
                    warn!("Replaced a live waiter for order ref {}", order_ref);
                }
            }
            Command::WaitTransfer(reply) => self.transfer.arm(reply),
            Command::BeginQuery(kind) => self.accumulators.begin(kind),
            Command::Read(read) => read(&self.cache),
            Command::Shutdown => {}
        }
    }

    pub(crate) async fn on_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::FrontConnected => {
                info!("Front connected: {}", self.front);
                self.deliver_signal(Ok(Signal::Connected));
            }
            GatewayEvent::FrontDisconnected { reason } => self.on_disconnected(reason).await,
            GatewayEvent::RspAuthenticate { rsp } => {
                let outcome = match RspInfo::error(Some(&rsp)) {
                    Some(err) => Err(err.clone()),
                    None => Ok(Signal::Authenticated),
                };
                self.deliver_signal(outcome);
            }
            GatewayEvent::RspUserLogin { login, rsp } => {
                let outcome = match (RspInfo::error(Some(&rsp)), login) {
                    (Some(err), _) => Err(err.clone()),
                    (None, Some(login)) => {
                        info!(
                            "Logged in: front_id={} session_id={} trading_day={}",
                            login.front_id, login.session_id, login.trading_day
                        );
                        self.cache.session = Some(Session::new(self.front.clone(), &login));
                        Ok(Signal::LoggedIn(login))
                    }
                    (None, None) => Err(RspInfo::new(-1, "login response carried no session")),
                };
                self.deliver_signal(outcome);
            }
            GatewayEvent::RspSettlementConfirm { rsp } => {
                if let Some(err) = RspInfo::error(Some(&rsp)) {
                    warn!("Settlement confirmation failed, continuing: {}", err);
                }
                self.deliver_signal(Ok(Signal::SettlementConfirmed));
            }

            GatewayEvent::RspQryInvestor(page) => {
                let round = self.accumulators.investors.push(page);
                self.finish_reference(QueryKind::Investor, round, SessionCache::merge_investors);
            }
            GatewayEvent::RspQryInstrument(page) => {
                let round = self.accumulators.instruments.push(page);
                self.finish_reference(QueryKind::Instrument, round, SessionCache::merge_instruments);
            }
            GatewayEvent::RspQryOrder(page) => {
                let round = self.accumulators.orders.push(page);
                self.finish_reference(QueryKind::Order, round, SessionCache::merge_orders);
            }
            GatewayEvent::RspQryTrade(page) => {
                let round = self.accumulators.trades.push(page);
                self.finish_reference(QueryKind::Trade, round, SessionCache::merge_trades);
            }
            GatewayEvent::RspQryAccountRegister(page) => {
                let round = self.accumulators.account_registers.push(page);
                self.finish_reference(
                    QueryKind::AccountRegister,
                    round,
                    SessionCache::merge_account_registers,
                );
            }
            GatewayEvent::RspQryPosition(page) => {
                let round = self.accumulators.positions.push(page);
                self.finish_snapshot(QueryKind::Position, round, Snapshot::Positions);
            }
            GatewayEvent::RspQryPositionDetail(page) => {
                let round = self.accumulators.position_details.push(page);
                self.finish_snapshot(QueryKind::PositionDetail, round, Snapshot::PositionDetails);
            }
            GatewayEvent::RspQryTradingAccount(page) => {
                let round = self.accumulators.trading_accounts.push(page);
                self.finish_snapshot(QueryKind::TradingAccount, round, Snapshot::TradingAccounts);
            }

            GatewayEvent::RspOrderInsert { input, rsp } => {
                warn!("Order {} rejected: {}", input.order_ref, rsp);
                let delivery = self.orders.deliver(&input.order_ref, Err(rsp));
                log_delivery(self.orders.name(), delivery);
            }
            GatewayEvent::RtnOrder(order) => self.on_order(order).await,
            GatewayEvent::RtnTrade(trade) => {
                debug!(
                    "Trade {} for order {}: {} @ {}",
                    trade.trade_id, trade.local_id, trade.volume, trade.price
                );
                self.cache.record_trade(trade.clone());
                self.publish(Notification::Trade(trade)).await;
            }
            GatewayEvent::RspOrderAction { action, rsp } => {
                warn!("Cancel of order {} rejected: {}", action.order_ref, rsp);
                self.publish(Notification::ActionRejected { action, rsp }).await;
            }

            GatewayEvent::RspTransfer { direction, rsp, is_last } => {
                debug!("Transfer response {:?}: {}", direction, rsp);
                if is_last {
                    self.deliver_transfer(&rsp);
                }
            }
            GatewayEvent::RtnTransfer(report) => {
                info!(
                    "Transfer {:?} of {} for {}: {}",
                    report.direction, report.amount, report.bank_account, report.rsp
                );
                self.deliver_transfer(&report.rsp);
                self.publish(Notification::Transfer(report)).await;
            }
        }
    }

    /// Cache the update; complete a placement only on the first update of
    /// an order from this session
    async fn on_order(&mut self, order: Order) {
        let first = !self.cache.orders.contains_key(&order.local_id);
        let own = self.cache.is_own(&order);
        debug!(
            "Order {} ref={} status={:?} first={} own={}",
            order.local_id, order.order_ref, order.status, first, own
        );

        self.cache.orders.insert(order.local_id.clone(), order.clone());

        if first && own {
            let delivery = self
                .orders
                .deliver(&order.order_ref, Ok(order.local_id.clone()));
            log_delivery(self.orders.name(), delivery);
        }

        self.publish(Notification::Order(order)).await;
    }

    async fn on_disconnected(&mut self, reason: i32) {
        warn!("Front disconnected: reason={}", reason);
        let rsp = RspInfo::new(reason, "front disconnected");

        let mut failed = self.orders.deliver_all(Err(rsp.clone()));
        for delivery in [
            self.signal.deliver(Err(rsp.clone())),
            self.transfer.deliver(Err(rsp)),
        ] {
            if delivery == Delivery::Delivered {
                failed += 1;
            }
        }
        if failed > 0 {
            debug!("Failed {} pending waits on disconnect", failed);
        }

        self.publish(Notification::Disconnected { reason }).await;
    }

    fn finish_reference<T>(
        &mut self,
        kind: QueryKind,
        round: Option<Round<T>>,
        merge: fn(&mut SessionCache, Vec<T>),
    ) {
        let Some(round) = round else { return };
        let outcome = round.map(|records| {
            info!("Loaded {} {} records", records.len(), kind.as_str());
            merge(&mut self.cache, records);
            Signal::Loaded(kind)
        });
        self.deliver_query(kind, outcome);
    }

    fn finish_snapshot<T>(
        &mut self,
        kind: QueryKind,
        round: Option<Round<T>>,
        wrap: fn(Vec<T>) -> Snapshot,
    ) {
        let Some(round) = round else { return };
        self.deliver_query(kind, round.map(|records| Signal::Snapshot(wrap(records))));
    }

    /// Session progress never completes a query wait
    fn deliver_signal(&mut self, outcome: Outcome<Signal>) {
        let delivery = self.signal.deliver_untagged(outcome);
        log_delivery(self.signal.name(), delivery);
    }

    /// A query round, successful or not, only completes a wait for its kind
    fn deliver_query(&mut self, kind: QueryKind, outcome: Outcome<Signal>) {
        let delivery = self.signal.deliver_tagged(kind.as_str(), outcome);
        log_delivery(self.signal.name(), delivery);
    }

    fn deliver_transfer(&mut self, rsp: &RspInfo) {
        let outcome = match RspInfo::error(Some(rsp)) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        };
        let delivery = self.transfer.deliver(outcome);
        log_delivery(self.transfer.name(), delivery);
    }

    async fn publish(&self, notification: Notification) {
        if let Err(e) = self.notifications.publish(&notification).await {
            warn!("Failed to publish {} notification: {}", notification.kind(), e);
        }
    }
}

fn log_delivery(slot: &str, delivery: Delivery) {
    match delivery {
        Delivery::Delivered => debug!("Delivered to {} waiter", slot),
        Delivery::Unclaimed => debug!("No {} waiter", slot),
        Delivery::Abandoned => warn!("{} waiter gave up before delivery", slot),
    }
}

/// Apply a read to the cache and ship the answer back
pub(crate) fn read_command<R, F>(read: F) -> (Command, tokio::sync::oneshot::Receiver<R>)
where
    R: Send + 'static,
    F: FnOnce(&SessionCache) -> R + Send + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    let command: CacheRead = Box::new(move |cache| {
        let _ = tx.send(read(cache));
    });
    (Command::Read(command), rx)
}

#[cfg(test)]
mod tests;
