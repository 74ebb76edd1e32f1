//! Loopback command implementation
//!
//! Runs the full bus lifecycle against the in-memory emulator: resolve,
//! init, enable, write, read back, disable.

use padmux_core::board::BoardDatabase;
use padmux_core::bus::SpiBus;
use padmux_dummy::DummySercom;

use super::{find_pin, parse_hex, print_wiring, CommandError};
use crate::cli::SpiPinArgs;

/// Write `data` through an emulated bus and read it back
pub fn run_loopback(db: &BoardDatabase, args: &SpiPinArgs, data: &str) -> Result<(), CommandError> {
    let payload = parse_hex(data)?;
    let mut registry = db.registry()?;
    let driver = DummySercom::new(db.instance_count())?;

    let sck = find_pin(db, args.sck)?;
    let mosi = find_pin(db, args.mosi)?;
    let miso = find_pin(db, args.miso)?;

    let mut bus = SpiBus::new(driver, &mut registry, sck, mosi, miso, args.baudrate)?;
    print_wiring(bus.config(), args.sck, args.mosi, args.miso);
    println!();

    bus.write(&payload)?;
    let mut readback = vec![0u8; payload.len()];
    bus.read(&mut readback)?;

    println!("Sent:     {}", format_hex(&payload));
    println!("Received: {}", format_hex(&readback));

    let instance = bus.instance();
    let driver = bus.deinit(&mut registry);
    let (written, read) = driver.traffic(instance);
    log::info!("{}: {} bytes written, {} bytes read", instance, written, read);

    Ok(())
}

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
