//! Transport abstraction layer
//!
//! Two conduits run through the layer:
//! - the inbound queue ([`queue`]) carrying gateway callbacks and internal
//!   commands to the correlator, in one FIFO order
//! - the notification channel ([`channel`]) broadcasting unsolicited order
//!   and trade updates to any number of subscribers

pub mod channel;
pub mod queue;

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Publisher - sends messages to every current subscriber
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Publish a message
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;

    /// Number of subscribers currently listening
    fn subscriber_count(&self) -> usize;
}

/// Subscriber - receives published messages
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}
