//! Board pin tables
//!
//! A pin table is a slice of [`Pin`]s. The built-in SAMD21 table is a
//! static; with the `std` feature, tables can also be loaded from RON board
//! descriptions through [`BoardDatabase`].

#[cfg(feature = "std")]
mod database;
pub mod samd21;

#[cfg(feature = "std")]
pub use database::{BoardDatabase, BoardDbError};

use crate::error::{Error, Result};
use crate::pin::{Pin, PinId};

/// Look up a pin in a table
pub fn find_pin(pins: &[Pin], id: PinId) -> Option<&Pin> {
    pins.iter().find(|pin| pin.id == id)
}

/// Look up the clock, data-out and data-in pins by identifier
pub fn spi_pins(pins: &[Pin], clock: PinId, data_out: PinId, data_in: PinId) -> Result<[&Pin; 3]> {
    let get = |id| find_pin(pins, id).ok_or(Error::UnknownPin);
    Ok([get(clock)?, get(data_out)?, get(data_in)?])
}
