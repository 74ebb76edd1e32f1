//! padmux-core - SERCOM pad resolution for SPI masters
//!
//! This crate works out whether one shared serial peripheral instance
//! (a SERCOM on SAMD21-class parts) can carry an SPI clock, data-out and
//! data-in signal on three given pins, and if so computes the wiring the
//! peripheral needs: pad pinmux codes, DOPO/DIPO and bit rate. It is
//! designed to be `no_std` compatible for use in firmware.
//!
//! # Features
//!
//! - `std` - Enable standard library support, error trait impls and RON
//!   board description loading
//!
//! # Example
//!
//! ```ignore
//! use padmux_core::board::{find_pin, samd21};
//! use padmux_core::{resolver, InstanceRegistry, PinId};
//!
//! let registry = InstanceRegistry::new(samd21::INSTANCE_COUNT)?;
//! let sck = find_pin(samd21::PINS, "PA17".parse()?).unwrap();
//! let mosi = find_pin(samd21::PINS, "PA16".parse()?).unwrap();
//! let miso = find_pin(samd21::PINS, "PA19".parse()?).unwrap();
//!
//! let config = resolver::resolve(sck, mosi, miso, 1_000_000, &registry)?;
//! println!("{} DOPO={}", config.instance, config.dopo.bits());
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod bus;
pub mod driver;
pub mod error;
pub mod instance;
pub mod pin;
pub mod resolver;
pub mod wiring;

pub use error::{Error, Result};
pub use instance::{InstanceId, InstanceRegistry};
pub use pin::{Pad, Pin, PinAttachment, PinId, Pinmux};
pub use wiring::{DataOrder, PadSet, WiringConfig};
