use serde::{Deserialize, Serialize};

/// Price instruction for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    /// Limit price supplied by the caller
    Limit,
    /// Any price (market order)
    Any,
}

/// Time-in-force instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCondition {
    /// Immediate or cancel: unfilled remainder is cancelled at once
    Ioc,
    /// Good for the trading day
    Gfd,
}

/// Volume instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeCondition {
    /// Any volume may fill
    Any,
    /// Complete volume or nothing
    Complete,
}

/// Named order placement policy
///
/// | Policy | Price | Time-in-force | Volume |
/// |---|---|---|---|
/// | Limit | limit | GFD | any |
/// | Fak | limit | IOC | any |
/// | Fok | limit | IOC | complete |
/// | Market | any | IOC | any |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderPolicy {
    Limit,
    /// Fill and kill
    Fak,
    /// Fill or kill
    Fok,
    Market,
}

impl OrderPolicy {
    pub fn price_type(&self) -> PriceType {
        match self {
            OrderPolicy::Market => PriceType::Any,
            _ => PriceType::Limit,
        }
    }

    pub fn time_condition(&self) -> TimeCondition {
        match self {
            OrderPolicy::Limit => TimeCondition::Gfd,
            _ => TimeCondition::Ioc,
        }
    }

    pub fn volume_condition(&self) -> VolumeCondition {
        match self {
            OrderPolicy::Fok => VolumeCondition::Complete,
            _ => VolumeCondition::Any,
        }
    }

    /// Whether the caller's price is carried (and tick-aligned)
    pub fn is_priced(&self) -> bool {
        self.price_type() == PriceType::Limit
    }
}
