use hermes_core::{
    AccountRegister, Instrument, InstrumentId, Investor, Order, OrderLocalId, Session, Trade,
};
use std::collections::HashMap;

/// Everything the correlator has learned over the session's lifetime
///
/// Only the correlator writes to it. Readers get a copy of what they ask
/// for through a read command.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    /// Set once the login response arrives
    pub session: Option<Session>,
    pub investors: HashMap<String, Investor>,
    pub instruments: HashMap<InstrumentId, Instrument>,
    /// Latest known state of every order, from any session
    pub orders: HashMap<OrderLocalId, Order>,
    /// Executions grouped by the order they filled
    pub trades: HashMap<OrderLocalId, Vec<Trade>>,
    /// Registered bank accounts, keyed by bank account number
    pub account_registers: HashMap<String, AccountRegister>,
}

impl SessionCache {
    /// Returns true if the order carrying these identifiers was placed by this session
    pub fn is_own(&self, order: &Order) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.owns(order.front_id, order.session_id))
    }

    pub fn merge_investors(&mut self, records: Vec<Investor>) {
        for investor in records {
            self.investors.insert(investor.investor_id.clone(), investor);
        }
    }

    pub fn merge_instruments(&mut self, records: Vec<Instrument>) {
        for instrument in records {
            self.instruments
                .insert(instrument.instrument_id.clone(), instrument);
        }
    }

    pub fn merge_orders(&mut self, records: Vec<Order>) {
        for order in records {
            self.orders.insert(order.local_id.clone(), order);
        }
    }

    /// Trades already seen through broadcasts are not duplicated
    pub fn merge_trades(&mut self, records: Vec<Trade>) {
        for trade in records {
            self.record_trade(trade);
        }
    }

    pub fn merge_account_registers(&mut self, records: Vec<AccountRegister>) {
        for register in records {
            self.account_registers
                .insert(register.bank_account.clone(), register);
        }
    }

    pub fn record_trade(&mut self, trade: Trade) {
        let fills = self.trades.entry(trade.local_id.clone()).or_default();
        if !fills.iter().any(|t| t.trade_id == trade.trade_id) {
            fills.push(trade);
        }
    }
}
