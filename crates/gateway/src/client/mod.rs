//! Trading client
//!
//! The synchronous-looking façade over the asynchronous gateway. Each
//! operation arms a rendezvous slot, submits its request, and waits for the
//! correlated answer with a deadline. The correlator task behind it owns
//! every cache; reads here go through it as commands.

mod orders;
mod queries;
mod transfer;

use crate::config::LoginConfig;
use crate::correlator::{Command, Correlator, SessionCache, read_command};
use crate::error::{GatewayError, Result, TransportError};
use crate::handshake::Handshake;
use crate::notification::Notification;
use crate::transport::channel::{ChannelPublisher, ChannelSubscriber};
use crate::transport::queue::{CommandSender, EventQueue};
use hermes_core::{
    AccountRegister, Instrument, Investor, LoginInfo, Order, OrderRef, Session, Trade,
};
use hermes_ports::TraderApi;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub struct TradingClient {
    api: Arc<dyn TraderApi>,
    config: LoginConfig,
    commands: CommandSender,
    notifications: ChannelPublisher<Notification>,
    /// Set once the handshake completes
    login: OnceLock<LoginInfo>,
    starting: AtomicBool,
    /// Last order reference handed out
    order_ref: AtomicU64,
    /// One transient query in flight at a time
    query_lock: Mutex<()>,
    /// One transfer in flight at a time
    transfer_lock: Mutex<()>,
    correlator: JoinHandle<()>,
}

impl TradingClient {
    /// Create a client and spawn its correlator
    ///
    /// Must be called from within a tokio runtime. `queue` must be the
    /// counterpart of the sink `api` emits into.
    pub fn new(config: LoginConfig, api: Arc<dyn TraderApi>, queue: EventQueue) -> Self {
        let notifications = ChannelPublisher::new(config.notification_capacity);
        let (commands, rx) = queue.into_parts();
        let correlator = Correlator::new(config.front.clone(), notifications.clone());
        let correlator = tokio::spawn(correlator.run(rx));

        Self {
            api,
            config,
            commands,
            notifications,
            login: OnceLock::new(),
            starting: AtomicBool::new(false),
            order_ref: AtomicU64::new(0),
            query_lock: Mutex::new(()),
            transfer_lock: Mutex::new(()),
            correlator,
        }
    }

    /// Run the handshake; the client accepts requests once this returns Ok
    ///
    /// Fails with the first error or timeout of the sequence. A failed start
    /// may be retried on a fresh client only, since the front connection is
    /// left in an unknown state.
    pub async fn start(&self) -> Result<LoginInfo> {
        if self.login.get().is_some() || self.starting.swap(true, Ordering::SeqCst) {
            return Err(GatewayError::AlreadyStarted);
        }

        let login = Handshake::new(self.api.as_ref(), &self.commands, &self.config)
            .run()
            .await?;

        self.order_ref.store(login.max_order_ref, Ordering::SeqCst);
        let login = self.login.get_or_init(|| login).clone();
        info!(
            "Trading client ready: front_id={} session_id={}",
            login.front_id, login.session_id
        );
        Ok(login)
    }

    /// Receive every order, trade and transfer update from now on
    pub fn subscribe(&self) -> ChannelSubscriber<Notification> {
        self.notifications.subscribe()
    }

    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    /// Login answer, once started
    pub fn login_info(&self) -> Option<&LoginInfo> {
        self.login.get()
    }

    pub fn is_ready(&self) -> bool {
        self.login.get().is_some()
    }

    pub async fn session(&self) -> Result<Option<Session>> {
        self.read(|cache| cache.session.clone()).await
    }

    pub async fn instrument(&self, instrument_id: &str) -> Result<Option<Instrument>> {
        let id = instrument_id.to_string();
        self.read(move |cache| cache.instruments.get(&id).cloned())
            .await
    }

    pub async fn instruments(&self) -> Result<Vec<Instrument>> {
        self.read(|cache| cache.instruments.values().cloned().collect())
            .await
    }

    pub async fn investors(&self) -> Result<Vec<Investor>> {
        self.read(|cache| cache.investors.values().cloned().collect())
            .await
    }

    /// Latest known state of an order placed by any session
    pub async fn order(&self, local_id: &str) -> Result<Option<Order>> {
        let id = local_id.to_string();
        self.read(move |cache| cache.orders.get(&id).cloned()).await
    }

    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.read(|cache| cache.orders.values().cloned().collect())
            .await
    }

    /// Executions of one order, in arrival order
    pub async fn trades(&self, local_id: &str) -> Result<Vec<Trade>> {
        let id = local_id.to_string();
        self.read(move |cache| cache.trades.get(&id).cloned().unwrap_or_default())
            .await
    }

    pub async fn account_register(&self, bank_account: &str) -> Result<Option<AccountRegister>> {
        let account = bank_account.to_string();
        self.read(move |cache| cache.account_registers.get(&account).cloned())
            .await
    }

    /// Copy of everything cached so far
    pub async fn cache_snapshot(&self) -> Result<SessionCache> {
        self.read(|cache| cache.clone()).await
    }

    async fn read<R, F>(&self, read: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&SessionCache) -> R + Send + 'static,
    {
        let (command, rx) = read_command(read);
        self.commands.send(command)?;
        rx.await.map_err(|_| TransportError::ChannelClosed.into())
    }

    fn ready(&self) -> Result<&LoginInfo> {
        self.login.get().ok_or(GatewayError::NotReady)
    }

    /// Strictly increasing, starting above the login's highest reference
    fn next_order_ref(&self) -> OrderRef {
        (self.order_ref.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

impl Drop for TradingClient {
    fn drop(&mut self) {
        if self.commands.send(Command::Shutdown).is_err() {
            warn!("Correlator already stopped");
            self.correlator.abort();
        }
    }
}
