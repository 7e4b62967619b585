//! Instrument reference data and tick arithmetic

mod instrument;
mod tick;

pub use instrument::{Instrument, ProductClass};
pub use tick::{is_tick_aligned, round_to_tick};
