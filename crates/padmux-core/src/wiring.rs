//! SPI wiring configuration for a SERCOM
//!
//! A [`WiringConfig`] is what the driver needs to bring a SERCOM up as SPI
//! master: which pinmux code goes on which pad, the DOPO code describing
//! where clock and data-out sit, the DIPO pad carrying data-in, and the bit
//! rate.
//!
//! Only four clock/data-out arrangements exist in silicon:
//!
//! | DOPO | SCK pad | MOSI pad |
//! |------|---------|----------|
//! | 0    | 1       | 0        |
//! | 1    | 3       | 2        |
//! | 2    | 1       | 3        |
//! | 3    | 3       | 0        |

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::instance::InstanceId;
use crate::pin::{Pad, Pinmux};

/// Bit position of DOPO in `SERCOM_SPI_CTRLA`
pub const CTRLA_DOPO_POS: u32 = 16;
/// Bit position of DIPO in `SERCOM_SPI_CTRLA`
pub const CTRLA_DIPO_POS: u32 = 20;

bitflags! {
    /// Set of SERCOM pads
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PadSet: u8 {
        /// PAD[0]
        const PAD0 = 1 << 0;
        /// PAD[1]
        const PAD1 = 1 << 1;
        /// PAD[2]
        const PAD2 = 1 << 2;
        /// PAD[3]
        const PAD3 = 1 << 3;
    }
}

impl From<Pad> for PadSet {
    fn from(pad: Pad) -> Self {
        PadSet::from_bits_truncate(1 << pad.index())
    }
}

/// Data-out pinout (DOPO) code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataOrder {
    /// SCK on pad 1, MOSI on pad 0
    Dopo0 = 0,
    /// SCK on pad 3, MOSI on pad 2
    Dopo1 = 1,
    /// SCK on pad 1, MOSI on pad 3
    Dopo2 = 2,
    /// SCK on pad 3, MOSI on pad 0
    Dopo3 = 3,
}

impl DataOrder {
    /// Look up the code for a clock/data-out pad pair
    pub fn from_pads(clock: Pad, data_out: Pad) -> Option<Self> {
        match (clock, data_out) {
            (Pad::Pad1, Pad::Pad0) => Some(Self::Dopo0),
            (Pad::Pad1, Pad::Pad3) => Some(Self::Dopo2),
            (Pad::Pad3, Pad::Pad0) => Some(Self::Dopo3),
            (Pad::Pad3, Pad::Pad2) => Some(Self::Dopo1),
            _ => None,
        }
    }

    /// Raw 2-bit code
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Pad carrying the clock
    pub const fn clock_pad(self) -> Pad {
        match self {
            Self::Dopo0 | Self::Dopo2 => Pad::Pad1,
            Self::Dopo1 | Self::Dopo3 => Pad::Pad3,
        }
    }

    /// Pad carrying data-out
    pub const fn data_out_pad(self) -> Pad {
        match self {
            Self::Dopo0 | Self::Dopo3 => Pad::Pad0,
            Self::Dopo1 => Pad::Pad2,
            Self::Dopo2 => Pad::Pad3,
        }
    }
}

/// A signal's pad and the pinmux code that puts the pin on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadRoute {
    /// Pad within the instance
    pub pad: Pad,
    /// Pinmux code for the pin
    pub pinmux: Pinmux,
}

/// Complete SPI master wiring for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringConfig {
    /// Instance to program
    pub instance: InstanceId,
    /// Pinmux per pad, `None` for unused pads
    pub pads: [Option<Pinmux>; 4],
    /// Clock/data-out arrangement
    pub dopo: DataOrder,
    /// Pad carrying data-in
    pub dipo: Pad,
    /// Requested bit rate in Hz
    pub baudrate: u32,
}

impl WiringConfig {
    /// Encode the wiring for resolved clock, data-out and data-in routes
    ///
    /// Fails with [`Error::IncompatibleWiring`] when the clock/data-out pad
    /// pair has no DOPO code or when data-in shares a pad with either.
    pub fn encode(
        instance: InstanceId,
        clock: PadRoute,
        data_out: PadRoute,
        data_in: PadRoute,
        baudrate: u32,
    ) -> Result<Self> {
        let incompatible = Error::IncompatibleWiring {
            clock: clock.pad,
            data_out: data_out.pad,
            data_in: data_in.pad,
        };

        let dopo = DataOrder::from_pads(clock.pad, data_out.pad).ok_or(incompatible)?;
        if data_in.pad == clock.pad || data_in.pad == data_out.pad {
            return Err(incompatible);
        }

        let mut pads = [None; 4];
        pads[clock.pad.index()] = Some(clock.pinmux);
        pads[data_out.pad.index()] = Some(data_out.pinmux);
        pads[data_in.pad.index()] = Some(data_in.pinmux);

        Ok(Self {
            instance,
            pads,
            dopo,
            dipo: data_in.pad,
            baudrate,
        })
    }

    /// Pinmux configured on `pad`
    pub fn pinmux(&self, pad: Pad) -> Option<Pinmux> {
        self.pads[pad.index()]
    }

    /// Pads that carry a signal
    pub fn used_pads(&self) -> PadSet {
        Pad::ALL
            .iter()
            .filter(|pad| self.pads[pad.index()].is_some())
            .fold(PadSet::empty(), |set, &pad| set | PadSet::from(pad))
    }

    /// Clock pad
    pub fn clock_pad(&self) -> Pad {
        self.dopo.clock_pad()
    }

    /// Data-out pad
    pub fn data_out_pad(&self) -> Pad {
        self.dopo.data_out_pad()
    }

    /// DOPO/DIPO bits of `SERCOM_SPI_CTRLA`
    pub fn mux_setting(&self) -> u32 {
        ((self.dopo.bits() as u32) << CTRLA_DOPO_POS) | ((self.dipo.index() as u32) << CTRLA_DIPO_POS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(pad: Pad, raw: u32) -> PadRoute {
        PadRoute {
            pad,
            pinmux: Pinmux(raw),
        }
    }

    #[test]
    fn test_dopo_table() {
        assert_eq!(DataOrder::from_pads(Pad::Pad1, Pad::Pad0), Some(DataOrder::Dopo0));
        assert_eq!(DataOrder::from_pads(Pad::Pad1, Pad::Pad3), Some(DataOrder::Dopo2));
        assert_eq!(DataOrder::from_pads(Pad::Pad3, Pad::Pad0), Some(DataOrder::Dopo3));
        assert_eq!(DataOrder::from_pads(Pad::Pad3, Pad::Pad2), Some(DataOrder::Dopo1));

        let mut valid = 0;
        for clock in Pad::ALL {
            for data_out in Pad::ALL {
                if let Some(dopo) = DataOrder::from_pads(clock, data_out) {
                    valid += 1;
                    assert_eq!(dopo.clock_pad(), clock);
                    assert_eq!(dopo.data_out_pad(), data_out);
                }
            }
        }
        assert_eq!(valid, 4);
    }

    #[test]
    fn test_clock_on_even_pad_is_never_valid() {
        for data_out in Pad::ALL {
            assert_eq!(DataOrder::from_pads(Pad::Pad0, data_out), None);
            assert_eq!(DataOrder::from_pads(Pad::Pad2, data_out), None);
        }
    }

    #[test]
    fn test_encode_populates_used_pads() {
        let config = WiringConfig::encode(
            InstanceId(1),
            route(Pad::Pad1, 0x11),
            route(Pad::Pad0, 0x10),
            route(Pad::Pad2, 0x12),
            4_000_000,
        )
        .unwrap();

        assert_eq!(config.dopo, DataOrder::Dopo0);
        assert_eq!(config.dipo, Pad::Pad2);
        assert_eq!(config.pads, [Some(Pinmux(0x10)), Some(Pinmux(0x11)), Some(Pinmux(0x12)), None]);
        assert_eq!(config.used_pads(), PadSet::PAD0 | PadSet::PAD1 | PadSet::PAD2);
        assert_eq!(config.clock_pad(), Pad::Pad1);
        assert_eq!(config.data_out_pad(), Pad::Pad0);
        assert_eq!(config.baudrate, 4_000_000);
    }

    #[test]
    fn test_mux_setting() {
        let config = WiringConfig::encode(
            InstanceId(4),
            route(Pad::Pad3, 1),
            route(Pad::Pad2, 2),
            route(Pad::Pad0, 3),
            1_000_000,
        )
        .unwrap();
        assert_eq!(config.mux_setting(), 1 << CTRLA_DOPO_POS);

        let config = WiringConfig::encode(
            InstanceId(4),
            route(Pad::Pad3, 1),
            route(Pad::Pad0, 2),
            route(Pad::Pad1, 3),
            1_000_000,
        )
        .unwrap();
        assert_eq!(config.mux_setting(), (3 << CTRLA_DOPO_POS) | (1 << CTRLA_DIPO_POS));
    }

    #[test]
    fn test_encode_rejects_bad_geometry() {
        let err = WiringConfig::encode(
            InstanceId(0),
            route(Pad::Pad0, 1),
            route(Pad::Pad1, 2),
            route(Pad::Pad2, 3),
            1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::IncompatibleWiring {
                clock: Pad::Pad0,
                data_out: Pad::Pad1,
                data_in: Pad::Pad2,
            }
        );
    }

    #[test]
    fn test_encode_rejects_shared_pad() {
        let err = WiringConfig::encode(
            InstanceId(0),
            route(Pad::Pad3, 1),
            route(Pad::Pad0, 2),
            route(Pad::Pad0, 3),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IncompatibleWiring { .. }));
    }
}
