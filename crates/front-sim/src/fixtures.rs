//! Sample reference data for a simulated trading day

use chrono::NaiveDate;
use hermes_core::{
    AccountRegister, Direction, Instrument, Investor, LoginInfo, OffsetFlag, Order, OrderStatus,
    Position, PositionDetail, PositionDirection, PriceType, TimeCondition, TradingAccount,
    VolumeCondition,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const BROKER_ID: &str = "9999";
pub const INVESTOR_ID: &str = "008107";
pub const BANK_ACCOUNT: &str = "6222020000000001";
pub const FRONT: &str = "tcp://127.0.0.1:10130";
pub const FRONT_ID: i32 = 1;
pub const SESSION_ID: i32 = 42;

pub fn login_info() -> LoginInfo {
    LoginInfo {
        broker_id: BROKER_ID.to_string(),
        user_id: INVESTOR_ID.to_string(),
        trading_day: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or_default(),
        front_id: FRONT_ID,
        session_id: SESSION_ID,
        max_order_ref: 7,
        system_name: "front-sim".to_string(),
    }
}

pub fn investor() -> Investor {
    Investor {
        broker_id: BROKER_ID.to_string(),
        investor_id: INVESTOR_ID.to_string(),
        investor_name: "Sim Investor".to_string(),
        identified_card_no: "110101199001010000".to_string(),
        is_active: true,
    }
}

/// Stock index future, tick 0.2
pub fn if2409() -> Instrument {
    Instrument::future("IF2409", "CFFEX", dec!(0.2)).with_multiplier(300)
}

/// Rebar future, tick 1
pub fn rb2410() -> Instrument {
    Instrument::future("rb2410", "SHFE", dec!(1)).with_multiplier(10)
}

pub fn account_register() -> AccountRegister {
    AccountRegister {
        broker_id: BROKER_ID.to_string(),
        bank_id: "1".to_string(),
        bank_branch_id: "0000".to_string(),
        bank_account: BANK_ACCOUNT.to_string(),
        account_id: INVESTOR_ID.to_string(),
        customer_name: "Sim Investor".to_string(),
        currency_id: "CNY".to_string(),
    }
}

pub fn trading_account() -> TradingAccount {
    TradingAccount {
        broker_id: BROKER_ID.to_string(),
        account_id: INVESTOR_ID.to_string(),
        currency_id: "CNY".to_string(),
        pre_balance: dec!(1000000),
        deposit: Decimal::ZERO,
        withdraw: Decimal::ZERO,
        balance: dec!(1000000),
        available: dec!(820000),
        curr_margin: dec!(180000),
        frozen_margin: Decimal::ZERO,
        commission: Decimal::ZERO,
        close_profit: Decimal::ZERO,
        position_profit: Decimal::ZERO,
        withdraw_quota: dec!(820000),
    }
}

pub fn long_position() -> Position {
    Position {
        broker_id: BROKER_ID.to_string(),
        investor_id: INVESTOR_ID.to_string(),
        instrument_id: "IF2409".to_string(),
        exchange_id: "CFFEX".to_string(),
        direction: PositionDirection::Long,
        position: 1,
        today_position: 1,
        yd_position: 0,
        position_cost: dec!(901560),
        open_cost: dec!(901560),
        use_margin: dec!(180000),
        position_profit: Decimal::ZERO,
        close_profit: Decimal::ZERO,
    }
}

pub fn position_detail() -> PositionDetail {
    PositionDetail {
        broker_id: BROKER_ID.to_string(),
        investor_id: INVESTOR_ID.to_string(),
        instrument_id: "IF2409".to_string(),
        exchange_id: "CFFEX".to_string(),
        direction: Direction::Buy,
        open_date: "20240701".to_string(),
        trade_id: "1".to_string(),
        volume: 1,
        open_price: dec!(3005.2),
        margin: dec!(180000),
        close_volume: 0,
    }
}

/// A resting order placed by another session of the same user
pub fn foreign_order(local_id: &str, order_ref: &str) -> Order {
    Order {
        broker_id: BROKER_ID.to_string(),
        investor_id: INVESTOR_ID.to_string(),
        instrument_id: "IF2409".to_string(),
        exchange_id: "CFFEX".to_string(),
        local_id: local_id.to_string(),
        order_ref: order_ref.to_string(),
        front_id: FRONT_ID + 1,
        session_id: SESSION_ID + 100,
        direction: Direction::Sell,
        offset: OffsetFlag::Close,
        price_type: PriceType::Limit,
        time_condition: TimeCondition::Gfd,
        volume_condition: VolumeCondition::Any,
        limit_price: dec!(3010),
        volume: 1,
        volume_traded: 0,
        status: OrderStatus::NoTradeQueueing,
        order_sys_id: format!("F{}", local_id.trim()),
        status_msg: String::new(),
        insert_time: "09:30:00".to_string(),
    }
}
