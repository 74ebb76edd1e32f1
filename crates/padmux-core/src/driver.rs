//! Peripheral driver trait
//!
//! The resolver only decides the wiring; programming registers and moving
//! bytes is the job of a platform driver. Every call makes a single
//! blocking attempt and reports success or failure.

use crate::error::Result;
use crate::instance::InstanceId;
use crate::wiring::WiringConfig;

/// Platform SERCOM driver used by [`crate::bus::SpiBus`]
pub trait SercomDriver {
    /// Program `config.instance` as SPI master with the given pad mapping,
    /// DOPO/DIPO and bit rate
    fn init(&mut self, config: &WiringConfig) -> Result<()>;

    /// Enable the instance
    fn enable(&mut self, instance: InstanceId) -> Result<()>;

    /// Disable the instance
    fn disable(&mut self, instance: InstanceId);

    /// Blocking write of `data`
    fn write(&mut self, instance: InstanceId, data: &[u8]) -> Result<()>;

    /// Blocking read filling `buf`
    fn read(&mut self, instance: InstanceId, buf: &mut [u8]) -> Result<()>;
}

impl<D: SercomDriver + ?Sized> SercomDriver for &mut D {
    fn init(&mut self, config: &WiringConfig) -> Result<()> {
        (**self).init(config)
    }

    fn enable(&mut self, instance: InstanceId) -> Result<()> {
        (**self).enable(instance)
    }

    fn disable(&mut self, instance: InstanceId) {
        (**self).disable(instance)
    }

    fn write(&mut self, instance: InstanceId, data: &[u8]) -> Result<()> {
        (**self).write(instance, data)
    }

    fn read(&mut self, instance: InstanceId, buf: &mut [u8]) -> Result<()> {
        (**self).read(instance, buf)
    }
}

