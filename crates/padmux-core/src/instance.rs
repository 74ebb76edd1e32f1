//! Peripheral instances and their ownership flags
//!
//! The registry replaces the per-peripheral `ENABLE` bit the hardware keeps:
//! an enabled instance belongs to an active bus and is skipped by the
//! resolver. The registry is owned by the caller and passed by reference,
//! so resolution stays a pure function of (pin tables, registry snapshot).

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

use crate::error::{Error, Result};

/// Maximum number of instances a registry can track
pub const MAX_INSTANCES: usize = 8;

/// Identifies one SERCOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u8);

impl InstanceId {
    /// Instance number
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SERCOM{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = Error;

    /// Accepts `SERCOM3`, `sercom3` or `3`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = match s.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("sercom") => &s[6..],
            _ => s,
        };
        digits
            .parse::<u8>()
            .map(InstanceId)
            .map_err(|_| Error::UnknownInstance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InstanceState {
    id: InstanceId,
    enabled: bool,
}

/// Tracks which instances are currently enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRegistry {
    instances: Vec<InstanceState, MAX_INSTANCES>,
}

impl InstanceRegistry {
    /// Create a registry for `count` instances (`SERCOM0` .. `SERCOM{count-1}`),
    /// all disabled
    pub fn new(count: usize) -> Result<Self> {
        if count > MAX_INSTANCES {
            return Err(Error::UnknownInstance);
        }
        let mut instances = Vec::new();
        for n in 0..count {
            // Capacity checked above
            let _ = instances.push(InstanceState {
                id: InstanceId(n as u8),
                enabled: false,
            });
        }
        Ok(Self { instances })
    }

    /// Number of instances tracked
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the registry tracks no instances
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether `id` belongs to this registry
    pub fn contains(&self, id: InstanceId) -> bool {
        self.state(id).is_some()
    }

    /// Whether `id` is enabled
    ///
    /// Instances the registry does not know are reported as enabled so that
    /// the resolver never hands them out.
    pub fn is_enabled(&self, id: InstanceId) -> bool {
        self.state(id).map_or(true, |s| s.enabled)
    }

    /// Mark `id` enabled
    pub fn acquire(&mut self, id: InstanceId) -> Result<()> {
        let state = self.state_mut(id).ok_or(Error::UnknownInstance)?;
        if state.enabled {
            return Err(Error::InstanceBusy);
        }
        state.enabled = true;
        log::debug!("{} acquired", id);
        Ok(())
    }

    /// Mark `id` disabled so it can be resolved again. Idempotent.
    pub fn release(&mut self, id: InstanceId) {
        if let Some(state) = self.state_mut(id) {
            if state.enabled {
                log::debug!("{} released", id);
            }
            state.enabled = false;
        }
    }

    /// Iterate over the enabled instances
    pub fn enabled(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.instances.iter().filter(|s| s.enabled).map(|s| s.id)
    }

    fn state(&self, id: InstanceId) -> Option<&InstanceState> {
        self.instances.iter().find(|s| s.id == id)
    }

    fn state_mut(&mut self, id: InstanceId) -> Option<&mut InstanceState> {
        self.instances.iter_mut().find(|s| s.id == id)
    }
}
