use serde::{Deserialize, Serialize};

/// Investor reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investor {
    pub broker_id: String,
    pub investor_id: String,
    pub investor_name: String,
    pub identified_card_no: String,
    pub is_active: bool,
}
