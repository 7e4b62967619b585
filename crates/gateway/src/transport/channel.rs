//! Tokio broadcast transport for notifications
//!
//! Messages are passed directly, no serialization. Publishing with no
//! subscriber is not an error: notifications are optional.

use crate::error::TransportError;
use crate::transport::{Publisher, Subscriber};
use async_trait::async_trait;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::broadcast;

/// Channel-based publisher using broadcast
#[derive(Clone)]
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<M>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a publisher with no subscribers yet
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let publisher = Self::new(capacity);
        let subscriber = publisher.subscribe();
        (publisher, subscriber)
    }

    /// Get another subscriber for this publisher
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        // Err only means nobody is listening right now
        let _ = self.tx.send(msg.clone());
        Ok(())
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Channel-based subscriber using broadcast receiver
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<M>,
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Ok(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Notification subscriber lagged, skipped {} messages", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        loop {
            match self.rx.try_recv() {
                Ok(msg) => return Ok(Some(msg)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }
}
