//! Session configuration
//!
//! Loaded from JSON; every tunable has a serde default so a minimal file
//! only names the front and the credentials.
//!
//! ```json
//! {
//!   "front": "tcp://180.168.146.187:10130",
//!   "broker_id": "9999",
//!   "user_id": "008107",
//!   "password": "1",
//!   "app_id": "simnow_client_test",
//!   "auth_code": "0000000000000000",
//!   "timeouts": { "order_ms": 2000 }
//! }
//! ```

use hermes_core::QueryKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Login and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Front address, e.g. `tcp://host:port`
    pub front: String,
    pub broker_id: String,
    pub user_id: String,
    pub password: String,
    /// Investor the session trades for; defaults to the user id
    #[serde(default)]
    pub investor_id: Option<String>,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub auth_code: String,
    /// Whether the front requires client authentication before login
    #[serde(default = "default_true")]
    pub authenticate: bool,
    /// Reference-data queries issued, in order, after settlement confirmation
    #[serde(default = "default_reference_queries")]
    pub reference_queries: Vec<QueryKind>,
    /// Pause between consecutive handshake queries
    #[serde(default = "default_query_interval")]
    pub query_interval_ms: u64,
    #[serde(default)]
    pub timeouts: Timeouts,
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Capacity of the notification broadcast channel
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

impl LoginConfig {
    pub fn new(
        front: impl Into<String>,
        broker_id: impl Into<String>,
        user_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            front: front.into(),
            broker_id: broker_id.into(),
            user_id: user_id.into(),
            password: password.into(),
            investor_id: None,
            app_id: String::new(),
            auth_code: String::new(),
            authenticate: true,
            reference_queries: default_reference_queries(),
            query_interval_ms: default_query_interval(),
            timeouts: Timeouts::default(),
            retry: RetryPolicy::default(),
            notification_capacity: default_notification_capacity(),
        }
    }

    pub fn with_auth(mut self, app_id: impl Into<String>, auth_code: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self.auth_code = auth_code.into();
        self.authenticate = true;
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.authenticate = false;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn investor_id(&self) -> &str {
        self.investor_id.as_deref().unwrap_or(&self.user_id)
    }

    pub fn query_interval(&self) -> Duration {
        Duration::from_millis(self.query_interval_ms)
    }
}

/// Bounded waits, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeouts {
    /// From connect request to the connected signal
    #[serde(default = "default_connect")]
    pub connect_ms: u64,
    /// Any later handshake step
    #[serde(default = "default_handshake_step")]
    pub handshake_step_ms: u64,
    /// Order placement rendezvous
    #[serde(default = "default_order")]
    pub order_ms: u64,
    /// Fund transfer rendezvous
    #[serde(default = "default_transfer")]
    pub transfer_ms: u64,
    /// Transient queries, multiplied by the number of known investors
    #[serde(default = "default_query_per_investor")]
    pub query_per_investor_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            connect_ms: default_connect(),
            handshake_step_ms: default_handshake_step(),
            order_ms: default_order(),
            transfer_ms: default_transfer(),
            query_per_investor_ms: default_query_per_investor(),
        }
    }
}

impl Timeouts {
    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    pub fn handshake_step(&self) -> Duration {
        Duration::from_millis(self.handshake_step_ms)
    }

    pub fn order(&self) -> Duration {
        Duration::from_millis(self.order_ms)
    }

    pub fn transfer(&self) -> Duration {
        Duration::from_millis(self.transfer_ms)
    }

    /// Query budget for a connection relaying `investors` logical investors
    pub fn query(&self, investors: usize) -> Duration {
        let investors = u32::try_from(investors.max(1)).unwrap_or(u32::MAX);
        Duration::from_millis(self.query_per_investor_ms).saturating_mul(investors)
    }
}

/// Flow-control retry policy for throttled submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_backoff")]
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: default_attempts(),
            backoff_ms: default_backoff(),
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_reference_queries() -> Vec<QueryKind> {
    vec![
        QueryKind::Investor,
        QueryKind::Instrument,
        QueryKind::Order,
        QueryKind::Trade,
        QueryKind::AccountRegister,
    ]
}

fn default_query_interval() -> u64 {
    1100
}

fn default_notification_capacity() -> usize {
    1000
}

fn default_connect() -> u64 {
    5000
}

fn default_handshake_step() -> u64 {
    30000
}

fn default_order() -> u64 {
    1000
}

fn default_transfer() -> u64 {
    5000
}

fn default_query_per_investor() -> u64 {
    3000
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_budget_scales_and_saturates() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.query(0), Duration::from_secs(3));
        assert_eq!(timeouts.query(4), Duration::from_secs(12));

        let huge = Timeouts {
            query_per_investor_ms: u64::MAX,
            ..Timeouts::default()
        };
        assert_eq!(huge.query(usize::MAX), Duration::MAX);
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let json = r#"{
            "front": "tcp://180.168.146.187:10130",
            "broker_id": "9999",
            "user_id": "008107",
            "password": "1"
        }"#;

        let config = LoginConfig::from_json_str(json).unwrap();
        assert_eq!(config.investor_id(), "008107");
        assert!(config.authenticate);
        assert_eq!(config.reference_queries.len(), 5);
        assert_eq!(config.reference_queries[0], QueryKind::Investor);
        assert_eq!(config.timeouts.connect(), Duration::from_secs(5));
        assert_eq!(config.timeouts.order(), Duration::from_secs(1));
        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.retry.backoff(), Duration::from_secs(1));
    }

    #[test]
    fn test_deserialize_overrides() {
        let json = r#"{
            "front": "tcp://127.0.0.1:10130",
            "broker_id": "9999",
            "user_id": "trader01",
            "password": "1",
            "investor_id": "008107",
            "authenticate": false,
            "reference_queries": ["Instrument"],
            "query_interval_ms": 0,
            "timeouts": { "order_ms": 2500 },
            "retry": { "attempts": 5 }
        }"#;

        let config = LoginConfig::from_json_str(json).unwrap();
        assert_eq!(config.investor_id(), "008107");
        assert!(!config.authenticate);
        assert_eq!(config.reference_queries, vec![QueryKind::Instrument]);
        assert_eq!(config.query_interval(), Duration::ZERO);
        assert_eq!(config.timeouts.order(), Duration::from_millis(2500));
        assert_eq!(config.timeouts.connect(), Duration::from_secs(5));
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.retry.backoff(), Duration::from_secs(1));
    }

    #[test]
    fn test_query_timeout_scales_with_investors() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.query(0), Duration::from_secs(3));
        assert_eq!(timeouts.query(1), Duration::from_secs(3));
        assert_eq!(timeouts.query(4), Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            LoginConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
