use serde::{Deserialize, Serialize};

use super::tick::round_to_tick;
use crate::values::{InstrumentId, Price};

/// Product class of a tradable instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductClass {
    Futures,
    Options,
    Combination,
    Spot,
}

/// Static reference data for a tradable instrument
///
/// Loaded once during the handshake and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub instrument_name: String,
    pub product_id: String,
    pub product_class: ProductClass,
    /// Contract multiplier
    pub volume_multiple: u32,
    /// Minimum price increment
    pub price_tick: Price,
    pub expire_date: String,
    pub is_trading: bool,
}

impl Instrument {
    /// Create a futures instrument with the given tick
    pub fn future(
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        price_tick: Price,
    ) -> Self {
        let instrument_id = instrument_id.into();
        Self {
            instrument_name: instrument_id.clone(),
            product_id: instrument_id
                .trim_end_matches(|c: char| c.is_ascii_digit())
                .to_string(),
            instrument_id,
            exchange_id: exchange_id.into(),
            product_class: ProductClass::Futures,
            volume_multiple: 1,
            price_tick,
            expire_date: String::new(),
            is_trading: true,
        }
    }

    pub fn with_multiplier(mut self, volume_multiple: u32) -> Self {
        self.volume_multiple = volume_multiple;
        self
    }

    /// Align a price to this instrument's tick
    pub fn round_price(&self, price: Price) -> Price {
        round_to_tick(price, self.price_tick)
    }
}
