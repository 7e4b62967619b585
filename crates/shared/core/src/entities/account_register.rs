use serde::{Deserialize, Serialize};

/// Bank-to-futures account registration
///
/// A transfer can only be requested for a bank account with a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRegister {
    pub broker_id: String,
    pub bank_id: String,
    pub bank_branch_id: String,
    pub bank_account: String,
    /// Futures account the bank account is bound to
    pub account_id: String,
    pub customer_name: String,
    pub currency_id: String,
}
