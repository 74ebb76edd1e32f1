//! Error types for padmux-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

use crate::pin::Pad;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Resolution errors
    /// No free instance reaches all three pins
    NoCompatibleInstance,
    /// An instance reaches all three pins but the pad geometry is invalid
    IncompatibleWiring {
        /// Pad the clock would use
        clock: Pad,
        /// Pad data-out would use
        data_out: Pad,
        /// Pad data-in would use
        data_in: Pad,
    },

    // Driver errors
    /// Driver rejected the configuration or failed to enable
    InitFailed,
    /// Blocking write or read reported failure
    TransferFailure,

    // Registry errors
    /// Instance is already enabled for another user
    InstanceBusy,
    /// Instance is not part of the registry
    UnknownInstance,

    // Table errors
    /// Pin is not in the pin table
    UnknownPin,
    /// Pad index outside 0..=3
    InvalidPad,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCompatibleInstance => {
                write!(f, "No hardware support available with those pins.")
            }
            Self::IncompatibleWiring {
                clock,
                data_out,
                data_in,
            } => write!(
                f,
                "SPI MOSI and clock pins incompatible (SCK pad {}, MOSI pad {}, MISO pad {})",
                clock.index(),
                data_out.index(),
                data_in.index()
            ),
            Self::InitFailed => write!(f, "SPI peripheral initialization failed"),
            Self::TransferFailure => write!(f, "SPI transfer failed"),
            Self::InstanceBusy => write!(f, "peripheral instance already in use"),
            Self::UnknownInstance => write!(f, "unknown peripheral instance"),
            Self::UnknownPin => write!(f, "unknown pin"),
            Self::InvalidPad => write!(f, "pad index out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
