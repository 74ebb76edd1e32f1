//! Pin descriptors and their peripheral attachments
//!
//! Every pin carries a fixed list of attachment records, one per SERCOM the
//! pin can be routed to. The list order is the datasheet order (SERCOM,
//! then SERCOM-ALT) and the resolver walks it in that order.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::instance::InstanceId;

/// Number of attachment records per pin
///
/// SAMD21 pins can reach at most two SERCOMs (peripheral functions C and D).
pub const ATTACHMENTS_PER_PIN: usize = 2;

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Port {
    /// Port A
    A = 0,
    /// Port B
    B = 1,
}

/// A physical pin, e.g. `PA17`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId {
    /// Port the pin belongs to
    pub port: Port,
    /// Index within the port (0-31)
    pub index: u8,
}

impl PinId {
    /// Create a pin identifier
    pub const fn new(port: Port, index: u8) -> Self {
        Self { port, index }
    }

    /// Linear pin number as used in pinmux codes (`port * 32 + index`)
    pub const fn number(&self) -> u32 {
        (self.port as u32) * 32 + self.index as u32
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let port = match self.port {
            Port::A => 'A',
            Port::B => 'B',
        };
        write!(f, "P{}{:02}", port, self.index)
    }
}

impl FromStr for PinId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let rest = s
            .strip_prefix('P')
            .or_else(|| s.strip_prefix('p'))
            .ok_or(Error::UnknownPin)?;
        let mut chars = rest.chars();
        let port = match chars.next() {
            Some('A') | Some('a') => Port::A,
            Some('B') | Some('b') => Port::B,
            _ => return Err(Error::UnknownPin),
        };
        let index: u8 = chars.as_str().parse().map_err(|_| Error::UnknownPin)?;
        if index > 31 {
            return Err(Error::UnknownPin);
        }
        Ok(Self::new(port, index))
    }
}

/// One of the four signal lanes of a SERCOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pad {
    /// PAD[0]
    Pad0 = 0,
    /// PAD[1]
    Pad1 = 1,
    /// PAD[2]
    Pad2 = 2,
    /// PAD[3]
    Pad3 = 3,
}

impl Pad {
    /// All pads in index order
    pub const ALL: [Pad; 4] = [Pad::Pad0, Pad::Pad1, Pad::Pad2, Pad::Pad3];

    /// Pad index (0-3)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw pad number
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(Error::InvalidPad)
    }
}

/// Peripheral function selected by the pin multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxFunction {
    /// Function A (EIC)
    A = 0,
    /// Function B (analog)
    B = 1,
    /// Function C (SERCOM)
    C = 2,
    /// Function D (SERCOM-ALT)
    D = 3,
    /// Function E (TC/TCC)
    E = 4,
    /// Function F (TCC)
    F = 5,
    /// Function G (COM)
    G = 6,
    /// Function H (AC/GCLK)
    H = 7,
}

impl MuxFunction {
    /// Parse a function letter
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'A' => Self::A,
            'B' => Self::B,
            'C' => Self::C,
            'D' => Self::D,
            'E' => Self::E,
            'F' => Self::F,
            'G' => Self::G,
            'H' => Self::H,
            _ => return None,
        })
    }
}

/// Pin multiplexer code: `(pin_number << 16) | function`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pinmux(pub u32);

impl Pinmux {
    /// No routing (all-zero code)
    pub const NONE: Pinmux = Pinmux(0);

    /// Build the pinmux code routing `pin` to `function`
    pub const fn new(pin: PinId, function: MuxFunction) -> Self {
        Self((pin.number() << 16) | function as u32)
    }

    /// Raw register value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Pin number encoded in the upper half
    pub const fn pin_number(&self) -> u32 {
        self.0 >> 16
    }

    /// Function index encoded in the lower half
    pub const fn function(&self) -> u32 {
        self.0 & 0xFFFF
    }
}

impl fmt::Display for Pinmux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// One way a pin can be routed to a peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAttachment {
    /// Instance this record routes to, `None` if the record is empty
    pub instance: Option<InstanceId>,
    /// Pad within the instance
    pub pad: Pad,
    /// Code that activates this routing
    pub pinmux: Pinmux,
}

impl PinAttachment {
    /// Empty record (no instance)
    pub const NONE: PinAttachment = PinAttachment {
        instance: None,
        pad: Pad::Pad0,
        pinmux: Pinmux::NONE,
    };

    /// Record routing `pin` to `pad` of `instance` via `function`
    pub const fn sercom(pin: PinId, instance: InstanceId, pad: Pad, function: MuxFunction) -> Self {
        Self {
            instance: Some(instance),
            pad,
            pinmux: Pinmux::new(pin, function),
        }
    }

    /// Whether this record routes to `instance`
    pub fn routes_to(&self, instance: InstanceId) -> bool {
        self.instance == Some(instance)
    }
}

/// A pin and its fixed attachment list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    /// Physical pin
    pub id: PinId,
    /// Attachment records in declared order
    pub attachments: [PinAttachment; ATTACHMENTS_PER_PIN],
}

impl Pin {
    /// Create a pin with the given attachments
    pub const fn new(id: PinId, attachments: [PinAttachment; ATTACHMENTS_PER_PIN]) -> Self {
        Self { id, attachments }
    }

    /// Pin with both SERCOM functions: `(instance, pad)` for C, then for D
    pub const fn with_sercoms(
        id: PinId,
        sercom: Option<(InstanceId, Pad)>,
        sercom_alt: Option<(InstanceId, Pad)>,
    ) -> Self {
        let primary = match sercom {
            Some((instance, pad)) => PinAttachment::sercom(id, instance, pad, MuxFunction::C),
            None => PinAttachment::NONE,
        };
        let alt = match sercom_alt {
            Some((instance, pad)) => PinAttachment::sercom(id, instance, pad, MuxFunction::D),
            None => PinAttachment::NONE,
        };
        Self::new(id, [primary, alt])
    }

    /// Whether any record routes to `instance`
    pub fn reaches(&self, instance: InstanceId) -> bool {
        self.attachments.iter().any(|a| a.routes_to(instance))
    }
}
