//! ATSAMD21G18A SERCOM pin table
//!
//! Source: SAM D21 datasheet, "I/O Multiplexing and Considerations",
//! peripheral functions C (SERCOM) and D (SERCOM-ALT). Pins without any
//! SERCOM function are left out.

use crate::instance::InstanceId;
use crate::pin::{Pad, Pin, PinId, Port};
use crate::pin::Pad::{Pad0 as P0, Pad1 as P1, Pad2 as P2, Pad3 as P3};
use crate::pin::Port::{A, B};

/// Number of SERCOM instances on the part
pub const INSTANCE_COUNT: usize = 6;

const fn sercom(n: u8, pad: Pad) -> Option<(InstanceId, Pad)> {
    Some((InstanceId(n), pad))
}

const fn pin(
    port: Port,
    index: u8,
    primary: Option<(InstanceId, Pad)>,
    alt: Option<(InstanceId, Pad)>,
) -> Pin {
    Pin::with_sercoms(PinId::new(port, index), primary, alt)
}

/// SERCOM-capable pins
#[rustfmt::skip]
pub static PINS: &[Pin] = &[
    pin(A,  0, None,            sercom(1, P0)),
    pin(A,  1, None,            sercom(1, P1)),
    pin(A,  4, None,            sercom(0, P0)),
    pin(A,  5, None,            sercom(0, P1)),
    pin(A,  6, None,            sercom(0, P2)),
    pin(A,  7, None,            sercom(0, P3)),
    pin(A,  8, sercom(0, P0),   sercom(2, P0)),
    pin(A,  9, sercom(0, P1),   sercom(2, P1)),
    pin(A, 10, sercom(0, P2),   sercom(2, P2)),
    pin(A, 11, sercom(0, P3),   sercom(2, P3)),
    pin(A, 12, sercom(2, P0),   sercom(4, P0)),
    pin(A, 13, sercom(2, P1),   sercom(4, P1)),
    pin(A, 14, sercom(2, P2),   sercom(4, P2)),
    pin(A, 15, sercom(2, P3),   sercom(4, P3)),
    pin(A, 16, sercom(1, P0),   sercom(3, P0)),
    pin(A, 17, sercom(1, P1),   sercom(3, P1)),
    pin(A, 18, sercom(1, P2),   sercom(3, P2)),
    pin(A, 19, sercom(1, P3),   sercom(3, P3)),
    pin(A, 20, sercom(5, P2),   sercom(3, P2)),
    pin(A, 21, sercom(5, P3),   sercom(3, P3)),
    pin(A, 22, sercom(3, P0),   sercom(5, P0)),
    pin(A, 23, sercom(3, P1),   sercom(5, P1)),
    pin(A, 24, sercom(3, P2),   sercom(5, P2)),
    pin(A, 25, sercom(3, P3),   sercom(5, P3)),
    pin(A, 30, None,            sercom(1, P2)),
    pin(A, 31, None,            sercom(1, P3)),
    pin(B,  2, None,            sercom(5, P0)),
    pin(B,  3, None,            sercom(5, P1)),
    pin(B,  8, None,            sercom(4, P0)),
    pin(B,  9, None,            sercom(4, P1)),
    pin(B, 10, None,            sercom(4, P2)),
    pin(B, 11, None,            sercom(4, P3)),
    pin(B, 22, None,            sercom(5, P2)),
    pin(B, 23, None,            sercom(5, P3)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::find_pin;
    use crate::error::Error;
    use crate::instance::InstanceRegistry;
    use crate::pin::{MuxFunction, Pinmux};
    use crate::resolver::resolve;
    use crate::wiring::DataOrder;

    fn get(name: &str) -> &'static Pin {
        find_pin(PINS, name.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_table_is_consistent() {
        for pin in PINS {
            for attachment in pin.attachments.iter() {
                if let Some(instance) = attachment.instance {
                    assert!(instance.index() < INSTANCE_COUNT);
                    assert_eq!(attachment.pinmux.pin_number(), pin.id.number());
                }
            }
        }
        // No duplicate pins
        for (i, a) in PINS.iter().enumerate() {
            assert!(PINS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_sercom1_spi() {
        let reg = InstanceRegistry::new(INSTANCE_COUNT).unwrap();
        let config = resolve(get("PA17"), get("PA16"), get("PA19"), 1_000_000, &reg).unwrap();

        assert_eq!(config.instance, InstanceId(1));
        assert_eq!(config.dopo, DataOrder::Dopo0);
        assert_eq!(config.dipo, Pad::Pad3);
        assert_eq!(
            config.pinmux(Pad::Pad1),
            Some(Pinmux::new(PinId::new(Port::A, 17), MuxFunction::C))
        );
        assert_eq!(
            config.pinmux(Pad::Pad0),
            Some(Pinmux::new(PinId::new(Port::A, 16), MuxFunction::C))
        );
        assert_eq!(config.pinmux(Pad::Pad2), None);
    }

    #[test]
    fn test_sercom_alt_clock() {
        // PA13 clock: SERCOM2 pad 1 first, then SERCOM4 pad 1
        let mut reg = InstanceRegistry::new(INSTANCE_COUNT).unwrap();
        let config = resolve(get("PA13"), get("PA12"), get("PA15"), 1, &reg).unwrap();
        assert_eq!(config.instance, InstanceId(2));

        reg.acquire(InstanceId(2)).unwrap();
        // SERCOM4 for clock and data-in; data-out keeps its SERCOM2 record
        let config = resolve(get("PA13"), get("PA12"), get("PA15"), 1, &reg).unwrap();
        assert_eq!(config.instance, InstanceId(4));
        assert_eq!(config.dopo, DataOrder::Dopo0);
        assert_eq!(
            config.pinmux(Pad::Pad0),
            Some(Pinmux::new(PinId::new(Port::A, 12), MuxFunction::C))
        );
    }

    #[test]
    fn test_pins_on_different_sercoms() {
        let reg = InstanceRegistry::new(INSTANCE_COUNT).unwrap();
        // PA05 only reaches SERCOM0, PB22 only SERCOM5
        assert_eq!(
            resolve(get("PA05"), get("PA04"), get("PB22"), 1, &reg),
            Err(Error::NoCompatibleInstance)
        );
    }

    #[test]
    fn test_data_out_without_primary_function() {
        let reg = InstanceRegistry::new(INSTANCE_COUNT).unwrap();
        // PA04 has no function C record, so its empty first record is used
        let config = resolve(get("PA05"), get("PA04"), get("PA06"), 1, &reg).unwrap();
        assert_eq!(config.instance, InstanceId(0));
        assert_eq!(config.dopo, DataOrder::Dopo0);
        assert_eq!(config.dipo, Pad::Pad2);
        assert_eq!(config.pinmux(Pad::Pad0), Some(Pinmux::NONE));
        assert_eq!(
            config.pinmux(Pad::Pad1),
            Some(Pinmux::new(PinId::new(Port::A, 5), MuxFunction::D))
        );
    }

    #[test]
    fn test_clock_on_even_pad() {
        let reg = InstanceRegistry::new(INSTANCE_COUNT).unwrap();
        // PA06 is SERCOM0 pad 2, never a clock pad
        assert!(matches!(
            resolve(get("PA06"), get("PA04"), get("PA05"), 1, &reg),
            Err(Error::IncompatibleWiring { .. })
        ));
    }
}
