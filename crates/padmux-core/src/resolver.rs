//! Pin-to-instance resolution
//!
//! The search runs in three phases, each exposed on its own:
//!
//! 1. [`candidate_instances`]: the clock pin's attachments in declared
//!    order, skipping empty records and enabled instances.
//! 2. [`data_out_routes`]: the data-out pin's attachments in declared order.
//!    These are not filtered by instance.
//! 3. [`match_data_in`]: the first data-in attachment on the candidate
//!    instance.
//!
//! Phase 3 does not look at the phase 2 record, so advancing phase 2 after a
//! failed match never changes the outcome and a successful search always
//! takes the first data-out record. This is the search order existing boards
//! were validated against and it is kept as is; a warning is logged when the
//! chosen data-out record belongs to another instance.

use crate::error::{Error, Result};
use crate::instance::{InstanceId, InstanceRegistry};
use crate::pin::Pin;
use crate::wiring::{PadRoute, WiringConfig};

/// A clock attachment on a free instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Instance under consideration
    pub instance: InstanceId,
    /// Clock pad and pinmux on that instance
    pub clock: PadRoute,
}

/// Outcome of the search before wiring is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Selected instance
    pub instance: InstanceId,
    /// Clock route
    pub clock: PadRoute,
    /// Data-out route
    pub data_out: PadRoute,
    /// Data-in route
    pub data_in: PadRoute,
    /// Whether the data-out record actually routes to `instance`
    pub data_out_on_instance: bool,
}

/// Phase 1: free instances reachable from the clock pin, in declared order
pub fn candidate_instances<'a>(
    clock: &'a Pin,
    registry: &'a InstanceRegistry,
) -> impl Iterator<Item = Candidate> + 'a {
    clock.attachments.iter().filter_map(move |attachment| {
        let instance = attachment.instance?;
        if registry.is_enabled(instance) {
            log::trace!("{}: {} in use, skipping", clock.id, instance);
            return None;
        }
        Some(Candidate {
            instance,
            clock: PadRoute {
                pad: attachment.pad,
                pinmux: attachment.pinmux,
            },
        })
    })
}

/// Phase 2: data-out routes in declared order, with the instance each
/// record belongs to
pub fn data_out_routes(data_out: &Pin) -> impl Iterator<Item = (Option<InstanceId>, PadRoute)> + '_ {
    data_out.attachments.iter().map(|attachment| {
        (
            attachment.instance,
            PadRoute {
                pad: attachment.pad,
                pinmux: attachment.pinmux,
            },
        )
    })
}

/// Phase 3: first data-in route on `instance`
pub fn match_data_in(data_in: &Pin, instance: InstanceId) -> Option<PadRoute> {
    data_in
        .attachments
        .iter()
        .find(|attachment| attachment.routes_to(instance))
        .map(|attachment| PadRoute {
            pad: attachment.pad,
            pinmux: attachment.pinmux,
        })
}

/// Find the instance and routes for the three pins
pub fn search(
    clock: &Pin,
    data_out: &Pin,
    data_in: &Pin,
    registry: &InstanceRegistry,
) -> Result<SearchResult> {
    for candidate in candidate_instances(clock, registry) {
        log::trace!(
            "{}: trying {} pad {}",
            clock.id,
            candidate.instance,
            candidate.clock.pad.index()
        );
        for (out_instance, out_route) in data_out_routes(data_out) {
            if let Some(in_route) = match_data_in(data_in, candidate.instance) {
                return Ok(SearchResult {
                    instance: candidate.instance,
                    clock: candidate.clock,
                    data_out: out_route,
                    data_in: in_route,
                    data_out_on_instance: out_instance == Some(candidate.instance),
                });
            }
        }
    }
    Err(Error::NoCompatibleInstance)
}

/// Resolve the wiring for an SPI master on `clock`, `data_out` and `data_in`
///
/// Reads `registry` but does not modify it; committing the instance is up
/// to the caller (see [`crate::bus::SpiBus`]).
pub fn resolve(
    clock: &Pin,
    data_out: &Pin,
    data_in: &Pin,
    baudrate: u32,
    registry: &InstanceRegistry,
) -> Result<WiringConfig> {
    let found = search(clock, data_out, data_in, registry)?;

    if !found.data_out_on_instance {
        log::warn!(
            "{}: data-out record is not on {}, using pad {} anyway",
            data_out.id,
            found.instance,
            found.data_out.pad.index()
        );
    }

    let config = WiringConfig::encode(
        found.instance,
        found.clock,
        found.data_out,
        found.data_in,
        baudrate,
    )?;

    log::debug!(
        "SPI on {}: SCK {} pad {}, MOSI {} pad {}, MISO {} pad {}, DOPO {}",
        config.instance,
        clock.id,
        found.clock.pad.index(),
        data_out.id,
        found.data_out.pad.index(),
        data_in.id,
        found.data_in.pad.index(),
        config.dopo.bits()
    );

    Ok(config)
}
