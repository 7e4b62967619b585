use serde::{Deserialize, Serialize};

use crate::values::Amount;

/// Funds snapshot of one trading account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingAccount {
    pub broker_id: String,
    pub account_id: String,
    pub currency_id: String,
    pub pre_balance: Amount,
    pub deposit: Amount,
    pub withdraw: Amount,
    pub balance: Amount,
    pub available: Amount,
    pub curr_margin: Amount,
    pub frozen_margin: Amount,
    pub commission: Amount,
    pub close_profit: Amount,
    pub position_profit: Amount,
    pub withdraw_quota: Amount,
}
