//! Session handshake
//!
//! Drives a new session from connection to ready, one step at a time:
//! connect, authenticate (optional), login, confirm settlement, then each
//! configured reference-data query in order. Every step issues one request
//! and waits, with a deadline, for the signal that completes it. Any error
//! or timeout aborts the whole sequence.

use crate::config::LoginConfig;
use crate::correlator::{Command, Outcome, Signal};
use crate::error::{GatewayError, Result, TransportError};
use crate::retry::submit_with_retry;
use crate::transport::queue::CommandSender;
use hermes_core::{
    AuthenticateRequest, LoginInfo, LoginRequest, QueryKind, QueryRequest,
    SettlementConfirmRequest,
};
use hermes_ports::TraderApi;
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::time::{Instant, timeout_at};

/// Where a session stands in the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Disconnected,
    Connected,
    Authenticated,
    LoggedIn,
    SettlementConfirmed,
    /// This many reference-data queries have completed
    Loading(usize),
    ReferenceDataLoaded,
    Ready,
}

/// One request of the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    Authenticate,
    Login,
    ConfirmSettlement,
    Query(QueryKind),
    /// No request left
    Finish,
}

impl Step {
    /// Returns true if `signal` completes this step
    pub(crate) fn completed_by(&self, signal: &Signal) -> bool {
        match (self, signal) {
            (Step::Connect, Signal::Connected) => true,
            (Step::Authenticate, Signal::Authenticated) => true,
            (Step::Login, Signal::LoggedIn(_)) => true,
            (Step::ConfirmSettlement, Signal::SettlementConfirmed) => true,
            (Step::Query(kind), Signal::Loaded(loaded)) => kind == loaded,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Step::Connect => "front connection".to_string(),
            Step::Authenticate => "authentication".to_string(),
            Step::Login => "login".to_string(),
            Step::ConfirmSettlement => "settlement confirmation".to_string(),
            Step::Query(kind) => format!("{} query", kind.as_str()),
            Step::Finish => "handshake".to_string(),
        }
    }
}

impl HandshakeState {
    /// The request to issue from this state
    pub fn next_step(&self, authenticate: bool, queries: &[QueryKind]) -> Step {
        let query = |done: usize| queries.get(done).map_or(Step::Finish, |k| Step::Query(*k));
        match self {
            HandshakeState::Disconnected => Step::Connect,
            HandshakeState::Connected if authenticate => Step::Authenticate,
            HandshakeState::Connected | HandshakeState::Authenticated => Step::Login,
            HandshakeState::LoggedIn => Step::ConfirmSettlement,
            HandshakeState::SettlementConfirmed => query(0),
            HandshakeState::Loading(done) => query(*done),
            HandshakeState::ReferenceDataLoaded | HandshakeState::Ready => Step::Finish,
        }
    }

    /// The state once `step` has completed
    pub fn advance(&self, step: Step, queries: usize) -> HandshakeState {
        match step {
            Step::Connect => HandshakeState::Connected,
            Step::Authenticate => HandshakeState::Authenticated,
            Step::Login => HandshakeState::LoggedIn,
            Step::ConfirmSettlement => HandshakeState::SettlementConfirmed,
            Step::Query(_) => {
                let done = match self {
                    HandshakeState::Loading(done) => done + 1,
                    _ => 1,
                };
                if done >= queries {
                    HandshakeState::ReferenceDataLoaded
                } else {
                    HandshakeState::Loading(done)
                }
            }
            Step::Finish => HandshakeState::Ready,
        }
    }
}

/// Runs the handshake against one gateway
pub(crate) struct Handshake<'a> {
    api: &'a dyn TraderApi,
    commands: &'a CommandSender,
    config: &'a LoginConfig,
}

impl<'a> Handshake<'a> {
    pub(crate) fn new(
        api: &'a dyn TraderApi,
        commands: &'a CommandSender,
        config: &'a LoginConfig,
    ) -> Self {
        Self {
            api,
            commands,
            config,
        }
    }

    pub(crate) async fn run(self) -> Result<LoginInfo> {
        let queries = &self.config.reference_queries;
        let mut state = HandshakeState::Disconnected;
        let mut login = None;

        info!("Starting handshake with {} via {}", self.config.front, self.api.name());

        loop {
            let step = state.next_step(self.config.authenticate, queries);
            if step == Step::Finish {
                state = state.advance(step, queries.len());
                break;
            }

            if matches!(state, HandshakeState::Loading(_)) {
                // Pace consecutive queries under the gateway's rate limit
                tokio::time::sleep(self.config.query_interval()).await;
            }

            let signal = self.complete(step).await?;
            if let Signal::LoggedIn(info) = signal {
                login = Some(info);
            }

            state = state.advance(step, queries.len());
            debug!("Handshake state: {:?}", state);
        }

        let login = login.ok_or(GatewayError::NotReady)?;
        info!(
            "Session ready: {:?}, trading day {}",
            state, login.trading_day
        );
        Ok(login)
    }

    /// Issue the step's request and wait for its completing signal
    async fn complete(&self, step: Step) -> Result<Signal> {
        let budget = match step {
            Step::Connect => self.config.timeouts.connect(),
            _ => self.config.timeouts.handshake_step(),
        };
        let deadline = Instant::now() + budget;

        if let Step::Query(kind) = step {
            self.commands.send(Command::BeginQuery(kind))?;
        }
        let mut rx = self.arm(step)?;
        self.issue(step).await?;

        loop {
            match timeout_at(deadline, rx).await {
                Err(_) => {
                    warn!("Handshake timed out waiting for {}", step.describe());
                    return Err(GatewayError::timeout(step.describe(), budget));
                }
                Ok(Err(_)) => return Err(TransportError::ChannelClosed.into()),
                Ok(Ok(Err(rsp))) => {
                    warn!("{} failed: {}", step.describe(), rsp);
                    return Err(GatewayError::Rejected(rsp));
                }
                Ok(Ok(Ok(signal))) if step.completed_by(&signal) => return Ok(signal),
                Ok(Ok(Ok(signal))) => {
                    warn!(
                        "Ignoring {:?} while waiting for {}",
                        signal,
                        step.describe()
                    );
                    rx = self.arm(step)?;
                }
            }
        }
    }

    fn arm(&self, step: Step) -> Result<oneshot::Receiver<Outcome<Signal>>> {
        let query = match step {
            Step::Query(kind) => Some(kind),
            _ => None,
        };
        let (tx, rx) = oneshot::channel();
        self.commands.send(Command::WaitSignal { query, reply: tx })?;
        Ok(rx)
    }

    async fn issue(&self, step: Step) -> Result<()> {
        let config = self.config;
        match step {
            Step::Connect => self.api.connect(&config.front).await,
            Step::Authenticate => {
                let req = AuthenticateRequest {
                    broker_id: config.broker_id.clone(),
                    user_id: config.user_id.clone(),
                    app_id: config.app_id.clone(),
                    auth_code: config.auth_code.clone(),
                };
                self.api.authenticate(&req).await?;
            }
            Step::Login => {
                let req = LoginRequest {
                    broker_id: config.broker_id.clone(),
                    user_id: config.user_id.clone(),
                    password: config.password.clone(),
                };
                self.api.login(&req).await?;
            }
            Step::ConfirmSettlement => {
                let req = SettlementConfirmRequest {
                    broker_id: config.broker_id.clone(),
                    investor_id: config.investor_id().to_string(),
                };
                self.api.confirm_settlement(&req).await?;
            }
            Step::Query(kind) => {
                let req = QueryRequest {
                    kind,
                    broker_id: config.broker_id.clone(),
                    investor_id: config.investor_id().to_string(),
                };
                let req = &req;
                let api = self.api;
                submit_with_retry(&config.retry, kind.as_str(), move || api.query(req)).await?;
            }
            Step::Finish => {}
        }
        Ok(())
    }
}
