//! Hermes Ports
//!
//! The boundary between the orchestration layer and the external trading
//! gateway: the submission trait the layer calls, the callback events the
//! gateway emits back, and the sink those callbacks are emitted into.

mod api;
mod error;
mod event;
mod sink;

pub use api::TraderApi;
pub use error::{SubmitResult, Throttled};
pub use event::{GatewayEvent, Paged, TransferReport};
pub use sink::{EventSink, SinkClosed};
