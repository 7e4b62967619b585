//! Inbound queue feeding the correlator
//!
//! The gateway pushes callbacks through a [`QueueSink`]; the client pushes
//! commands through the same queue, so a command sent before a request is
//! always processed before any callback that request produces. The queue is
//! unbounded: pushing never blocks the gateway's callback thread.

use crate::correlator::Command;
use crate::error::TransportError;
use hermes_ports::{EventSink, GatewayEvent, SinkClosed};
use tokio::sync::mpsc;

/// Everything the correlator consumes
pub(crate) enum Inbound {
    Event(GatewayEvent),
    Command(Command),
}

/// Handle the external gateway uses to deliver its callbacks
#[derive(Clone)]
pub struct QueueSink {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl QueueSink {
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl EventSink for QueueSink {
    /// Fails only once the correlator has stopped
    fn emit(&self, event: GatewayEvent) -> Result<(), SinkClosed> {
        self.tx.send(Inbound::Event(event)).map_err(|_| SinkClosed)
    }
}

/// Receiving end of the inbound queue, consumed by the client
pub struct EventQueue {
    tx: mpsc::UnboundedSender<Inbound>,
    rx: mpsc::UnboundedReceiver<Inbound>,
}

impl EventQueue {
    pub(crate) fn into_parts(
        self,
    ) -> (CommandSender, mpsc::UnboundedReceiver<Inbound>) {
        (CommandSender { tx: self.tx }, self.rx)
    }
}

/// Client-side handle for commands to the correlator
#[derive(Clone)]
pub(crate) struct CommandSender {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl CommandSender {
    pub(crate) fn send(&self, command: Command) -> Result<(), TransportError> {
        self.tx
            .send(Inbound::Command(command))
            .map_err(|_| TransportError::ChannelClosed)
    }
}

/// Create the inbound queue: give the sink to the gateway, the queue to the client
pub fn event_queue() -> (QueueSink, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueSink { tx: tx.clone() }, EventQueue { tx, rx })
}
