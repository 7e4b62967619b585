//! Single-result rendezvous between the correlator and a waiting caller
//!
//! A caller arms a slot with the sending half of a oneshot channel and then
//! waits on the receiving half with a deadline. The correlator delivers at
//! most one value per arming. Delivery never blocks: if the caller already
//! gave up, the value is dropped and reported as [`Delivery::Abandoned`].
//!
//! A slot may be armed with a tag. Tagged deliveries only reach a waiter
//! armed with the same tag (or an untagged one), and untagged deliveries
//! can be kept away from tagged waiters, so a late result meant for an
//! abandoned wait cannot satisfy a newer one.
//!
//! [`Waiters`] holds any number of concurrent waiters, one per tag.

use crate::error::{GatewayError, Result, TransportError};
use hermes_core::RspInfo;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;

/// Outcome of a delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the waiting caller
    Delivered,
    /// Nobody was waiting for this value
    Unclaimed,
    /// The waiter timed out or went away before the value arrived
    Abandoned,
}

struct Pending<T> {
    tag: Option<String>,
    tx: oneshot::Sender<T>,
}

/// A single-slot conduit owned by the correlator
pub struct Rendezvous<T> {
    name: &'static str,
    pending: Option<Pending<T>>,
}

impl<T> Rendezvous<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Arm for any next delivery, replacing a previous waiter
    pub fn arm(&mut self, tx: oneshot::Sender<T>) {
        self.pending = Some(Pending { tag: None, tx });
    }

    /// Arm for deliveries carrying `tag` only
    pub fn arm_tagged(&mut self, tag: impl Into<String>, tx: oneshot::Sender<T>) {
        self.pending = Some(Pending {
            tag: Some(tag.into()),
            tx,
        });
    }

    /// Returns true if a live waiter is armed
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.tx.is_closed())
    }

    /// Deliver to whoever is armed, tagged or not
    pub fn deliver(&mut self, value: T) -> Delivery {
        match self.pending.take() {
            Some(pending) => send(pending.tx, value),
            None => Delivery::Unclaimed,
        }
    }

    /// Deliver only to a waiter armed with `tag` or armed untagged
    pub fn deliver_tagged(&mut self, tag: &str, value: T) -> Delivery {
        self.deliver_if(|armed| armed.is_none_or(|t| t == tag), value)
    }

    /// Deliver only to an untagged waiter
    pub fn deliver_untagged(&mut self, value: T) -> Delivery {
        self.deliver_if(|armed| armed.is_none(), value)
    }

    fn deliver_if(&mut self, accepts: impl FnOnce(Option<&str>) -> bool, value: T) -> Delivery {
        match self.pending.take() {
            Some(pending) if accepts(pending.tag.as_deref()) => send(pending.tx, value),
            other => {
                self.pending = other;
                Delivery::Unclaimed
            }
        }
    }
}

/// Concurrent waiters, each armed under its own tag
pub struct Waiters<T> {
    name: &'static str,
    pending: HashMap<String, oneshot::Sender<T>>,
}

impl<T> Waiters<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: HashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Arm a waiter for `tag`; other tags are left alone
    ///
    /// Returns false if a live waiter for the same tag was replaced.
    pub fn arm(&mut self, tag: impl Into<String>, tx: oneshot::Sender<T>) -> bool {
        self.prune();
        match self.pending.insert(tag.into(), tx) {
            Some(previous) => previous.is_closed(),
            None => true,
        }
    }

    /// Number of live waiters
    pub fn len(&self) -> usize {
        self.pending.values().filter(|tx| !tx.is_closed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_armed(&self, tag: &str) -> bool {
        self.pending.get(tag).is_some_and(|tx| !tx.is_closed())
    }

    /// Deliver to the waiter armed under `tag`
    pub fn deliver(&mut self, tag: &str, value: T) -> Delivery {
        match self.pending.remove(tag) {
            Some(tx) => send(tx, value),
            None => Delivery::Unclaimed,
        }
    }

    /// Fail every waiter with a copy of `value`; returns how many received it
    pub fn deliver_all(&mut self, value: T) -> usize
    where
        T: Clone,
    {
        self.pending
            .drain()
            .filter(|(_, tx)| !tx.is_closed())
            .map(|(_, tx)| send(tx, value.clone()))
            .filter(|delivery| *delivery == Delivery::Delivered)
            .count()
    }

    /// Forget waiters that gave up
    fn prune(&mut self) {
        self.pending.retain(|_, tx| !tx.is_closed());
    }
}

fn send<T>(tx: oneshot::Sender<T>, value: T) -> Delivery {
    match tx.send(value) {
        Ok(()) => Delivery::Delivered,
        Err(_) => Delivery::Abandoned,
    }
}

/// Wait for an armed slot's outcome with a deadline
///
/// Exactly one of value or error comes back: the delivered value, the
/// delivered gateway rejection, or a timeout naming `what`.
pub(crate) async fn await_outcome<T>(
    rx: oneshot::Receiver<std::result::Result<T, RspInfo>>,
    budget: Duration,
    what: &str,
) -> Result<T> {
    match timeout(budget, rx).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(rsp))) => Err(GatewayError::Rejected(rsp)),
        // The correlator stopped
        Ok(Err(_)) => Err(TransportError::ChannelClosed.into()),
        Err(_) => Err(GatewayError::timeout(what, budget)),
    }
}
