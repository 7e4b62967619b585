mod account;
mod account_register;
mod investor;
mod order;
mod order_status;
mod order_type;
mod position;
mod rsp_info;
mod session;
mod side;
mod trade;

pub use account::TradingAccount;
pub use account_register::AccountRegister;
pub use investor::Investor;
pub use order::Order;
pub use order_status::OrderStatus;
pub use order_type::{OrderPolicy, PriceType, TimeCondition, VolumeCondition};
pub use position::{Position, PositionDetail};
pub use rsp_info::RspInfo;
pub use session::{LoginInfo, Session};
pub use side::{Direction, OffsetFlag, PositionDirection};
pub use trade::Trade;
