//! Board descriptions loaded at runtime
//!
//! Boards are described in RON:
//!
//! ```ron
//! (
//!     chip: "ATSAMD21E18A",
//!     instances: 6,
//!     pins: [
//!         (pin: "PA16", attachments: [
//!             Some((instance: 1, pad: 0, function: C)),
//!             Some((instance: 3, pad: 0, function: D)),
//!         ]),
//!         (pin: "PB11", attachments: [None, Some((instance: 4, pad: 3, function: D))]),
//!     ],
//! )
//! ```
//!
//! Attachment order is the search order. Missing trailing records are empty.

use std::fs;
use std::io;
use std::path::Path;
use std::string::{String, ToString};
use std::vec::Vec;
use std::format;

use thiserror::Error;

use super::samd21;
use crate::instance::{InstanceId, InstanceRegistry, MAX_INSTANCES};
use crate::pin::{MuxFunction, Pad, Pin, PinAttachment, PinId, Pinmux, ATTACHMENTS_PER_PIN};

/// Error type for board description loading
#[derive(Debug, Error)]
pub enum BoardDbError {
    /// I/O error reading the file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// RON parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Description is well-formed but inconsistent
    #[error("Validation error: {0}")]
    Validation(String),
}

// ============================================================================
// RON deserialization types (intermediate format)
// ============================================================================

/// Peripheral function letter
#[derive(Debug, Clone, Copy, serde::Deserialize)]
enum FunctionDef {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl From<FunctionDef> for MuxFunction {
    fn from(def: FunctionDef) -> Self {
        match def {
            FunctionDef::A => MuxFunction::A,
            FunctionDef::B => MuxFunction::B,
            FunctionDef::C => MuxFunction::C,
            FunctionDef::D => MuxFunction::D,
            FunctionDef::E => MuxFunction::E,
            FunctionDef::F => MuxFunction::F,
            FunctionDef::G => MuxFunction::G,
            FunctionDef::H => MuxFunction::H,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct AttachmentDef {
    instance: u8,
    pad: u8,
    function: FunctionDef,
}

#[derive(Debug, serde::Deserialize)]
struct PinDef {
    pin: String,
    #[serde(default)]
    attachments: Vec<Option<AttachmentDef>>,
}

#[derive(Debug, serde::Deserialize)]
struct BoardDef {
    chip: String,
    instances: usize,
    pins: Vec<PinDef>,
}

/// Pin table and instance count for one chip/board
#[derive(Debug, Clone)]
pub struct BoardDatabase {
    chip: String,
    instance_count: usize,
    pins: Vec<Pin>,
}

impl BoardDatabase {
    /// Database holding the built-in ATSAMD21G18A table
    pub fn samd21() -> Self {
        Self {
            chip: "ATSAMD21G18A".to_string(),
            instance_count: samd21::INSTANCE_COUNT,
            pins: samd21::PINS.to_vec(),
        }
    }

    /// Load a board description from a RON file
    pub fn load_file(path: &Path) -> Result<Self, BoardDbError> {
        let content = fs::read_to_string(path)?;
        Self::load_ron(&content)
    }

    /// Load a board description from a RON string
    pub fn load_ron(content: &str) -> Result<Self, BoardDbError> {
        let def: BoardDef = ron::from_str(content)?;

        if def.instances > MAX_INSTANCES {
            return Err(BoardDbError::Validation(format!(
                "{} instances exceeds the maximum of {}",
                def.instances, MAX_INSTANCES
            )));
        }

        let mut pins: Vec<Pin> = Vec::with_capacity(def.pins.len());
        for pin_def in def.pins {
            let id: PinId = pin_def
                .pin
                .parse()
                .map_err(|_| BoardDbError::Validation(format!("invalid pin name '{}'", pin_def.pin)))?;

            if pins.iter().any(|p| p.id == id) {
                return Err(BoardDbError::Validation(format!("pin {} listed twice", id)));
            }
            if pin_def.attachments.len() > ATTACHMENTS_PER_PIN {
                return Err(BoardDbError::Validation(format!(
                    "pin {} has {} attachments, at most {} allowed",
                    id,
                    pin_def.attachments.len(),
                    ATTACHMENTS_PER_PIN
                )));
            }

            let mut attachments = [PinAttachment::NONE; ATTACHMENTS_PER_PIN];
            for (slot, att_def) in attachments.iter_mut().zip(pin_def.attachments) {
                let Some(att_def) = att_def else {
                    continue;
                };
                if att_def.instance as usize >= def.instances {
                    return Err(BoardDbError::Validation(format!(
                        "pin {}: instance {} out of range (board has {})",
                        id, att_def.instance, def.instances
                    )));
                }
                let pad = Pad::from_index(att_def.pad).map_err(|_| {
                    BoardDbError::Validation(format!("pin {}: pad {} out of range", id, att_def.pad))
                })?;
                *slot = PinAttachment {
                    instance: Some(InstanceId(att_def.instance)),
                    pad,
                    pinmux: Pinmux::new(id, att_def.function.into()),
                };
            }

            pins.push(Pin::new(id, attachments));
        }

        log::debug!("Loaded board {} with {} pins", def.chip, pins.len());

        Ok(Self {
            chip: def.chip,
            instance_count: def.instances,
            pins,
        })
    }

    /// Chip or board name
    pub fn chip(&self) -> &str {
        &self.chip
    }

    /// Number of peripheral instances
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    /// All pins
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Look up a pin
    pub fn find(&self, id: PinId) -> Option<&Pin> {
        super::find_pin(&self.pins, id)
    }

    /// Fresh registry with every instance disabled
    pub fn registry(&self) -> crate::Result<InstanceRegistry> {
        InstanceRegistry::new(self.instance_count)
    }

    /// Instances reachable from a pin, in search order
    pub fn instances_for(&self, id: PinId) -> Vec<InstanceId> {
        self.find(id)
            .map(|pin| pin.attachments.iter().filter_map(|a| a.instance).collect())
            .unwrap_or_default()
    }
}
