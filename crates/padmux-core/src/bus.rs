//! SPI master lifecycle on top of the resolver
//!
//! [`SpiBus::new`] resolves the pins, programs and enables the instance
//! through the driver, and only then marks the instance enabled in the
//! registry. A failure at any step leaves the registry untouched.
//! [`SpiBus::deinit`] disables the instance and releases it.
//!
//! Transfers make exactly one driver attempt; retrying is left to the
//! caller.

use crate::driver::SercomDriver;
use crate::error::{Error, Result};
use crate::instance::{InstanceId, InstanceRegistry};
use crate::pin::Pin;
use crate::resolver;
use crate::wiring::WiringConfig;

/// An enabled SPI master on one instance
#[derive(Debug)]
pub struct SpiBus<D: SercomDriver> {
    driver: D,
    config: WiringConfig,
}

impl<D: SercomDriver> SpiBus<D> {
    /// Resolve the pins and bring up the instance as SPI master
    pub fn new(
        mut driver: D,
        registry: &mut InstanceRegistry,
        clock: &Pin,
        data_out: &Pin,
        data_in: &Pin,
        baudrate: u32,
    ) -> Result<Self> {
        let config = resolver::resolve(clock, data_out, data_in, baudrate, registry)?;

        driver.init(&config).map_err(|e| {
            log::error!("{}: init failed: {}", config.instance, e);
            Error::InitFailed
        })?;
        if let Err(e) = driver.enable(config.instance) {
            log::error!("{}: enable failed: {}", config.instance, e);
            driver.disable(config.instance);
            return Err(Error::InitFailed);
        }
        if let Err(e) = registry.acquire(config.instance) {
            driver.disable(config.instance);
            return Err(e);
        }

        log::info!(
            "{} enabled as SPI master at {} Hz",
            config.instance,
            config.baudrate
        );
        Ok(Self { driver, config })
    }

    /// Disable the instance, release it and hand back the driver
    pub fn deinit(mut self, registry: &mut InstanceRegistry) -> D {
        self.driver.disable(self.config.instance);
        registry.release(self.config.instance);
        log::debug!("{} disabled", self.config.instance);
        self.driver
    }

    /// Blocking write of `data`, single attempt
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.driver
            .write(self.config.instance, data)
            .map_err(|_| Error::TransferFailure)
    }

    /// Blocking read filling `buf`, single attempt
    pub fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        self.driver
            .read(self.config.instance, buf)
            .map_err(|_| Error::TransferFailure)
    }

    /// Wiring the instance was programmed with
    pub fn config(&self) -> &WiringConfig {
        &self.config
    }

    /// Instance in use
    pub fn instance(&self) -> InstanceId {
        self.config.instance
    }

    /// Bit rate in Hz
    pub fn baudrate(&self) -> u32 {
        self.config.baudrate
    }

    /// Borrow the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{Pad, PinAttachment, PinId, Pinmux, Port};

    /// Counts calls and fails on request
    #[derive(Debug, Default)]
    struct Recorder {
        inits: u32,
        enables: u32,
        disables: u32,
        writes: u32,
        reads: u32,
        fail_init: bool,
        fail_enable: bool,
        fail_transfer: bool,
    }

    impl SercomDriver for Recorder {
        fn init(&mut self, _config: &WiringConfig) -> Result<()> {
            self.inits += 1;
            if self.fail_init {
                return Err(Error::InitFailed);
            }
            Ok(())
        }

        fn enable(&mut self, _instance: InstanceId) -> Result<()> {
            self.enables += 1;
            if self.fail_enable {
                return Err(Error::InitFailed);
            }
            Ok(())
        }

        fn disable(&mut self, _instance: InstanceId) {
            self.disables += 1;
        }

        fn write(&mut self, _instance: InstanceId, _data: &[u8]) -> Result<()> {
            self.writes += 1;
            if self.fail_transfer {
                return Err(Error::TransferFailure);
            }
            Ok(())
        }

        fn read(&mut self, _instance: InstanceId, buf: &mut [u8]) -> Result<()> {
            self.reads += 1;
            if self.fail_transfer {
                return Err(Error::TransferFailure);
            }
            buf.fill(0xA5);
            Ok(())
        }
    }

    fn pins() -> (Pin, Pin, Pin) {
        let att = |pad, raw| PinAttachment {
            instance: Some(InstanceId(0)),
            pad,
            pinmux: Pinmux(raw),
        };
        (
            Pin::new(PinId::new(Port::A, 9), [att(Pad::Pad1, 1), PinAttachment::NONE]),
            Pin::new(PinId::new(Port::A, 8), [att(Pad::Pad0, 2), PinAttachment::NONE]),
            Pin::new(PinId::new(Port::A, 10), [att(Pad::Pad2, 3), PinAttachment::NONE]),
        )
    }

    #[test]
    fn test_new_acquires_and_deinit_releases() {
        let (sck, mosi, miso) = pins();
        let mut reg = InstanceRegistry::new(1).unwrap();

        let bus = SpiBus::new(Recorder::default(), &mut reg, &sck, &mosi, &miso, 500_000).unwrap();
        assert_eq!(bus.instance(), InstanceId(0));
        assert_eq!(bus.baudrate(), 500_000);
        assert!(reg.is_enabled(InstanceId(0)));
        assert_eq!(bus.driver().inits, 1);
        assert_eq!(bus.driver().enables, 1);

        // The only instance is taken now
        let second = SpiBus::new(Recorder::default(), &mut reg, &sck, &mosi, &miso, 500_000);
        assert_eq!(second.unwrap_err(), Error::NoCompatibleInstance);

        let driver = bus.deinit(&mut reg);
        assert_eq!(driver.disables, 1);
        assert!(!reg.is_enabled(InstanceId(0)));
    }

    #[test]
    fn test_init_failure_leaves_registry_untouched() {
        let (sck, mosi, miso) = pins();
        let mut reg = InstanceRegistry::new(1).unwrap();

        let driver = Recorder {
            fail_init: true,
            ..Default::default()
        };
        let err = SpiBus::new(driver, &mut reg, &sck, &mosi, &miso, 1).unwrap_err();
        assert_eq!(err, Error::InitFailed);
        assert!(!reg.is_enabled(InstanceId(0)));

        let mut driver = Recorder {
            fail_enable: true,
            ..Default::default()
        };
        let err = SpiBus::new(&mut driver, &mut reg, &sck, &mosi, &miso, 1).unwrap_err();
        assert_eq!(err, Error::InitFailed);
        assert_eq!(driver.inits, 1);
        assert!(!reg.is_enabled(InstanceId(0)));
    }

    #[test]
    fn test_enable_failure_disables_driver() {
        let (sck, mosi, miso) = pins();
        let mut reg = InstanceRegistry::new(1).unwrap();

        let mut driver = Recorder {
            fail_enable: true,
            ..Default::default()
        };
        let err = SpiBus::new(&mut driver, &mut reg, &sck, &mosi, &miso, 1).unwrap_err();
        assert_eq!(err, Error::InitFailed);
        assert_eq!(driver.enables, 1);
        assert_eq!(driver.disables, 1);
        assert!(!reg.is_enabled(InstanceId(0)));

        // A failed init never reaches enable, so nothing to undo
        let mut driver = Recorder {
            fail_init: true,
            ..Default::default()
        };
        SpiBus::new(&mut driver, &mut reg, &sck, &mosi, &miso, 1).unwrap_err();
        assert_eq!(driver.disables, 0);
    }

    #[test]
    fn test_transfers_single_attempt() {
        let (sck, mosi, miso) = pins();
        let mut reg = InstanceRegistry::new(1).unwrap();
        let mut driver = Recorder::default();

        {
            let mut bus = SpiBus::new(&mut driver, &mut reg, &sck, &mosi, &miso, 1).unwrap();
            bus.write(&[1, 2, 3]).unwrap();
            let mut buf = [0u8; 2];
            bus.read(&mut buf).unwrap();
            assert_eq!(buf, [0xA5, 0xA5]);

            // Empty transfers never reach the driver
            bus.write(&[]).unwrap();
            bus.read(&mut []).unwrap();
            bus.deinit(&mut reg);
        }
        assert_eq!(driver.writes, 1);
        assert_eq!(driver.reads, 1);

        driver.fail_transfer = true;
        let mut bus = SpiBus::new(&mut driver, &mut reg, &sck, &mosi, &miso, 1).unwrap();
        assert_eq!(bus.write(&[1]), Err(Error::TransferFailure));
        let mut buf = [0u8; 1];
        assert_eq!(bus.read(&mut buf), Err(Error::TransferFailure));
        bus.deinit(&mut reg);
        assert_eq!(driver.writes, 2);
        assert_eq!(driver.reads, 2);
    }
}
