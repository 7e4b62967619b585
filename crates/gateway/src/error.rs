//! Error types for the gateway crate

use hermes_core::RspInfo;
use hermes_ports::Throttled;
use std::time::Duration;
use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Channel closed")]
    ChannelClosed,
}

/// Errors surfaced by the session and request operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    #[error("Rejected by gateway: {0}")]
    Rejected(RspInfo),

    #[error("Throttled by gateway (code {0})")]
    Throttled(i32),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    #[error("Bank account not registered: {0}")]
    UnregisteredBankAccount(String),

    #[error("Session is not ready: call start first")]
    NotReady,

    #[error("Session already started")]
    AlreadyStarted,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl GatewayError {
    pub(crate) fn timeout(what: impl Into<String>, waited: Duration) -> Self {
        GatewayError::Timeout {
            what: what.into(),
            waited,
        }
    }

    /// Numeric code for callers that want an (error code, message) pair
    ///
    /// Business rejections keep the gateway's code; throttling is `-2`;
    /// everything raised locally is `-1`.
    pub fn error_id(&self) -> i32 {
        match self {
            GatewayError::Rejected(rsp) => rsp.error_id,
            GatewayError::Throttled(_) => -2,
            _ => -1,
        }
    }

    /// The error as a gateway-style envelope
    pub fn rsp_info(&self) -> RspInfo {
        match self {
            GatewayError::Rejected(rsp) => rsp.clone(),
            other => RspInfo::new(other.error_id(), other.to_string()),
        }
    }

    /// Returns true for failures raised without contacting the gateway
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self,
            GatewayError::UnknownInstrument(_)
                | GatewayError::UnknownOrder(_)
                | GatewayError::UnregisteredBankAccount(_)
        )
    }
}

impl From<Throttled> for GatewayError {
    fn from(t: Throttled) -> Self {
        GatewayError::Throttled(t.0)
    }
}

impl From<RspInfo> for GatewayError {
    fn from(rsp: RspInfo) -> Self {
        GatewayError::Rejected(rsp)
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ids() {
        assert_eq!(GatewayError::Rejected(RspInfo::new(31, "no funds")).error_id(), 31);
        assert_eq!(GatewayError::from(Throttled(-3)).error_id(), -2);
        assert_eq!(GatewayError::UnknownInstrument("xx".into()).error_id(), -1);
        assert_eq!(
            GatewayError::timeout("order", Duration::from_secs(1)).error_id(),
            -1
        );
    }

    #[test]
    fn test_rsp_info() {
        let rejected = GatewayError::Rejected(RspInfo::new(3, "bad password"));
        assert_eq!(rejected.rsp_info(), RspInfo::new(3, "bad password"));

        let local = GatewayError::UnregisteredBankAccount("622200".into());
        let rsp = local.rsp_info();
        assert_eq!(rsp.error_id, -1);
        assert!(rsp.error_msg.contains("622200"));
        assert!(local.is_local_validation());
    }
}
