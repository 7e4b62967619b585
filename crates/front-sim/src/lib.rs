//! Front simulator
//!
//! An in-process stand-in for the external trading front. It implements
//! [`TraderApi`](hermes_ports::TraderApi), records every accepted request,
//! and answers through an [`EventSink`](hermes_ports::EventSink) the way a
//! real front would, following a [`FrontScript`].

pub mod fixtures;
mod front;
mod request;
mod script;

pub use front::FrontSim;
pub use request::Request;
pub use script::{FrontScript, OrderMode, TransferMode};
