use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::values::{FrontId, SessionId};

/// Login response: the identity of one active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub broker_id: String,
    pub user_id: String,
    pub trading_day: NaiveDate,
    pub front_id: FrontId,
    pub session_id: SessionId,
    /// Highest order reference already used by this user
    pub max_order_ref: u64,
    pub system_name: String,
}

/// A logged-in connection to one front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub front: String,
    pub broker_id: String,
    pub user_id: String,
    pub front_id: FrontId,
    pub session_id: SessionId,
}

impl Session {
    pub fn new(front: impl Into<String>, login: &LoginInfo) -> Self {
        Self {
            front: front.into(),
            broker_id: login.broker_id.clone(),
            user_id: login.user_id.clone(),
            front_id: login.front_id,
            session_id: login.session_id,
        }
    }

    /// Returns true if a broadcast carrying these identifiers came from this session
    pub fn owns(&self, front_id: FrontId, session_id: SessionId) -> bool {
        self.front_id == front_id && self.session_id == session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> LoginInfo {
        LoginInfo {
            broker_id: "9999".into(),
            user_id: "008107".into(),
            trading_day: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            front_id: 1,
            session_id: 42,
            max_order_ref: 7,
            system_name: "sim".into(),
        }
    }

    #[test]
    fn test_session_owns() {
        let session = Session::new("tcp://127.0.0.1:10130", &login());
        assert!(session.owns(1, 42));
        assert!(!session.owns(1, 43));
        assert!(!session.owns(2, 42));
    }
}
