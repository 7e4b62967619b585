//! Hermes Gateway
//!
//! Session orchestration and event correlation over an asynchronous futures
//! trading gateway. Provides:
//! - A handshake driving a session from connect to ready
//! - Blocking-style order, transfer and query operations with deadlines
//! - Correlation of streamed callbacks into caches and single results
//! - A notification channel for unsolicited order and trade updates
//!
//! ## Architecture
//!
//! ```text
//!   caller                                  external gateway
//!     │ place_order / query / transfer            ▲      │ callbacks
//!  ┌──▼────────────┐   submit (TraderApi)         │      │ (EventSink)
//!  │ TradingClient ├──────────────────────────────┘      │
//!  └──┬────────▲───┘                                     │
//!     │ cmds   │ oneshot results                         │
//!  ┌──▼────────┴──────────────── inbound queue ◄─────────┘
//!  │ Correlator │── caches, rendezvous slots
//!  └─────┬──────┘
//!        │ Notification (broadcast)
//!        ▼
//!   subscribers
//! ```
//!
//! Commands and callbacks share one FIFO queue, so a wait armed before a
//! request is always in place before that request's callbacks are handled.

pub mod accumulator;
pub mod client;
pub mod config;
mod correlator;
pub mod error;
pub mod handshake;
pub mod notification;
pub mod rendezvous;
pub mod retry;
pub mod transport;

// Re-export commonly used types
pub use client::TradingClient;
pub use config::{ConfigError, LoginConfig, RetryPolicy, Timeouts};
pub use correlator::SessionCache;
pub use error::{GatewayError, Result, TransportError};
pub use handshake::{HandshakeState, Step};
pub use notification::Notification;
pub use transport::{
    Publisher, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
    queue::{EventQueue, QueueSink, event_queue},
};
