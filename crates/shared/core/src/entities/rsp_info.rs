use serde::{Deserialize, Serialize};
use std::fmt;

/// Error envelope carried by gateway responses
///
/// A zero `error_id` means success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RspInfo {
    pub error_id: i32,
    pub error_msg: String,
}

impl RspInfo {
    pub fn new(error_id: i32, error_msg: impl Into<String>) -> Self {
        Self {
            error_id,
            error_msg: error_msg.into(),
        }
    }

    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_error(&self) -> bool {
        self.error_id != 0
    }

    /// Returns the envelope if it carries an error
    pub fn error(rsp: Option<&RspInfo>) -> Option<&RspInfo> {
        rsp.filter(|r| r.is_error())
    }
}

impl fmt::Display for RspInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_id, self.error_msg)
    }
}
