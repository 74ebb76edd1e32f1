//! padmux-dummy - In-memory SERCOM emulator for testing
//!
//! This crate provides a dummy SERCOM driver that emulates a set of SPI
//! master instances in memory. Bytes written on an instance are looped back
//! to reads on the same instance, as if MOSI were wired to MISO. It's useful
//! for testing and development without real hardware.

#![cfg_attr(not(feature = "std"), no_std)]

use heapless::{Deque, Vec};

use padmux_core::driver::SercomDriver;
use padmux_core::error::{Error, Result};
use padmux_core::instance::{InstanceId, MAX_INSTANCES};
use padmux_core::wiring::WiringConfig;

/// Bytes each instance can hold between a write and the matching read
pub const LOOPBACK_DEPTH: usize = 256;

/// Value read when the loopback buffer runs dry (idle MISO line)
pub const IDLE_BYTE: u8 = 0xFF;

/// Failure to inject on the next matching call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Next `init` fails
    Init,
    /// Next `enable` fails
    Enable,
    /// Next `write` or `read` fails
    Transfer,
}

/// State of one emulated instance
#[derive(Debug, Default)]
struct DummyInstance {
    config: Option<WiringConfig>,
    enabled: bool,
    loopback: Deque<u8, LOOPBACK_DEPTH>,
    bytes_written: usize,
    bytes_read: usize,
}

/// Dummy SERCOM driver
///
/// Emulates SPI master instances in memory for testing purposes.
#[derive(Debug)]
pub struct DummySercom {
    instances: Vec<DummyInstance, MAX_INSTANCES>,
    fault: Option<Fault>,
}

impl DummySercom {
    /// Create an emulator with `count` instances
    pub fn new(count: usize) -> Result<Self> {
        if count > MAX_INSTANCES {
            return Err(Error::UnknownInstance);
        }
        let mut instances = Vec::new();
        for _ in 0..count {
            instances
                .push(DummyInstance::default())
                .map_err(|_| Error::UnknownInstance)?;
        }
        Ok(Self {
            instances,
            fault: None,
        })
    }

    /// Make the next matching call fail
    pub fn inject_fault(&mut self, fault: Fault) {
        self.fault = Some(fault);
    }

    /// Wiring `instance` was last initialized with
    pub fn config(&self, instance: InstanceId) -> Option<&WiringConfig> {
        self.instances.get(instance.index())?.config.as_ref()
    }

    /// Whether `instance` is enabled
    pub fn is_enabled(&self, instance: InstanceId) -> bool {
        self.instances
            .get(instance.index())
            .is_some_and(|inst| inst.enabled)
    }

    /// Total bytes written and read on `instance`
    pub fn traffic(&self, instance: InstanceId) -> (usize, usize) {
        self.instances
            .get(instance.index())
            .map_or((0, 0), |inst| (inst.bytes_written, inst.bytes_read))
    }

    fn take_fault(&mut self, fault: Fault) -> Result<()> {
        if self.fault == Some(fault) {
            self.fault = None;
            log::debug!("dummy: injected {:?} fault", fault);
            return Err(match fault {
                Fault::Init | Fault::Enable => Error::InitFailed,
                Fault::Transfer => Error::TransferFailure,
            });
        }
        Ok(())
    }

    fn instance_mut(&mut self, instance: InstanceId) -> Result<&mut DummyInstance> {
        self.instances
            .get_mut(instance.index())
            .ok_or(Error::UnknownInstance)
    }

    fn active_mut(&mut self, instance: InstanceId) -> Result<&mut DummyInstance> {
        let inst = self.instance_mut(instance)?;
        if inst.config.is_none() || !inst.enabled {
            log::warn!("dummy: {} used while not enabled", instance);
            return Err(Error::TransferFailure);
        }
        Ok(inst)
    }
}

impl SercomDriver for DummySercom {
    fn init(&mut self, config: &WiringConfig) -> Result<()> {
        self.take_fault(Fault::Init)?;
        let inst = self.instance_mut(config.instance)?;
        if inst.enabled {
            // CTRLA is enable-protected
            return Err(Error::InstanceBusy);
        }
        log::debug!(
            "dummy: {} init mux=0x{:08X} baud={}",
            config.instance,
            config.mux_setting(),
            config.baudrate
        );
        inst.config = Some(*config);
        inst.loopback.clear();
        Ok(())
    }

    fn enable(&mut self, instance: InstanceId) -> Result<()> {
        self.take_fault(Fault::Enable)?;
        let inst = self.instance_mut(instance)?;
        if inst.config.is_none() {
            return Err(Error::InitFailed);
        }
        inst.enabled = true;
        Ok(())
    }

    fn disable(&mut self, instance: InstanceId) {
        if let Ok(inst) = self.instance_mut(instance) {
            inst.enabled = false;
        }
    }

    fn write(&mut self, instance: InstanceId, data: &[u8]) -> Result<()> {
        self.take_fault(Fault::Transfer)?;
        let inst = self.active_mut(instance)?;
        for &byte in data {
            if inst.loopback.is_full() {
                // Oldest byte is overwritten, like an unread DATA register
                inst.loopback.pop_front();
            }
            let _ = inst.loopback.push_back(byte);
        }
        inst.bytes_written += data.len();
        Ok(())
    }

    fn read(&mut self, instance: InstanceId, buf: &mut [u8]) -> Result<()> {
        self.take_fault(Fault::Transfer)?;
        let inst = self.active_mut(instance)?;
        for byte in buf.iter_mut() {
            *byte = inst.loopback.pop_front().unwrap_or(IDLE_BYTE);
        }
        inst.bytes_read += buf.len();
        Ok(())
    }
}
