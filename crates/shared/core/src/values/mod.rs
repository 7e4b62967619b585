use rust_decimal::Decimal;

/// Price value - uses Decimal for exact tick arithmetic
pub type Price = Decimal;

/// Money amount (balances, transfers)
pub type Amount = Decimal;

/// Order volume in lots
pub type Volume = u32;

/// Gateway-assigned session number, unique per front
pub type SessionId = i32;

/// Front node number assigned on login
pub type FrontId = i32;

/// Client-side order handle assigned by the local gateway client
pub type OrderLocalId = String;

/// Client-chosen order reference, strictly increasing within a session
pub type OrderRef = String;

/// Instrument code (e.g. "rb2410")
pub type InstrumentId = String;
