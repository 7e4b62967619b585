use serde::{Deserialize, Serialize};

/// Order direction (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

/// Whether an order opens or closes a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetFlag {
    Open,
    Close,
    ForceClose,
    /// Close today's position (required by some exchanges)
    CloseToday,
    /// Close positions carried over from previous sessions
    CloseYesterday,
}

impl OffsetFlag {
    pub fn is_close(&self) -> bool {
        !matches!(self, OffsetFlag::Open)
    }
}

/// Side of a held position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionDirection {
    Net,
    Long,
    Short,
}
