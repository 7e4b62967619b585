use thiserror::Error;

/// The gateway refused to accept a request because of its rate limits
///
/// Distinct from a business rejection: nothing was sent, and the same
/// request may be retried after a pause. The code is the gateway's
/// non-zero submission return value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request throttled by gateway (code {0})")]
pub struct Throttled(pub i32);

/// Synchronous outcome of handing a request to the gateway
pub type SubmitResult = Result<(), Throttled>;
