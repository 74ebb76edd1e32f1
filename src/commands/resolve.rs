//! Resolve command implementation

use padmux_core::board::BoardDatabase;
use padmux_core::{resolver, Error, InstanceId};

use super::{find_pin, print_wiring, CommandError};
use crate::cli::SpiPinArgs;

/// Resolve the wiring for the given pins, treating `busy` instances as
/// already enabled
pub fn run_resolve(
    db: &BoardDatabase,
    args: &SpiPinArgs,
    busy: &[InstanceId],
) -> Result<(), CommandError> {
    let mut registry = db.registry()?;
    for &instance in busy {
        match registry.acquire(instance) {
            // Listed more than once
            Ok(()) | Err(Error::InstanceBusy) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let sck = find_pin(db, args.sck)?;
    let mosi = find_pin(db, args.mosi)?;
    let miso = find_pin(db, args.miso)?;

    let config = resolver::resolve(sck, mosi, miso, args.baudrate, &registry)?;

    log::info!(
        "SCK={} MOSI={} MISO={} -> {}",
        args.sck,
        args.mosi,
        args.miso,
        config.instance
    );
    print_wiring(&config, args.sck, args.mosi, args.miso);
    Ok(())
}
