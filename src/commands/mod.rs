//! CLI command implementations
//!
//! Every command works on a [`BoardDatabase`], either the built-in SAMD21
//! table or one loaded with `--board`.

mod loopback;
mod pins;
mod resolve;

pub use loopback::run_loopback;
pub use pins::list_pins;
pub use resolve::run_resolve;

use padmux_core::board::{BoardDatabase, BoardDbError};
use padmux_core::{Pad, Pin, PinId, WiringConfig};
use thiserror::Error;

/// Errors reported by CLI commands
#[derive(Debug, Error)]
pub enum CommandError {
    /// Pin not present in the board table
    #[error("{pin} is not a SERCOM pin on {chip}")]
    UnknownPin { pin: PinId, chip: String },

    /// Malformed hex payload
    #[error("Invalid hex data '{0}'")]
    InvalidHex(String),

    /// Resolution or bus error
    #[error(transparent)]
    Core(#[from] padmux_core::Error),

    /// Board description error
    #[error(transparent)]
    Board(#[from] BoardDbError),
}

/// Look up a pin, naming the board on failure
fn find_pin(db: &BoardDatabase, id: PinId) -> Result<&Pin, CommandError> {
    db.find(id).ok_or_else(|| CommandError::UnknownPin {
        pin: id,
        chip: db.chip().to_string(),
    })
}

/// Print a wiring configuration
fn print_wiring(config: &WiringConfig, sck: PinId, mosi: PinId, miso: PinId) {
    println!("Instance:     {}", config.instance);
    println!("Baud rate:    {} Hz", config.baudrate);
    println!(
        "DOPO:         {} (SCK pad {}, MOSI pad {})",
        config.dopo.bits(),
        config.clock_pad().index(),
        config.data_out_pad().index()
    );
    println!("DIPO:         {} (MISO pad)", config.dipo.index());
    println!("CTRLA mux:    0x{:08X}", config.mux_setting());
    println!();
    println!("{:<6} {:<6} {:>12}", "Pad", "Signal", "Pinmux");
    println!("{}", "-".repeat(26));
    for pad in Pad::ALL {
        let signal = if pad == config.clock_pad() {
            format!("{}", sck)
        } else if pad == config.data_out_pad() {
            format!("{}", mosi)
        } else if pad == config.dipo {
            format!("{}", miso)
        } else {
            "-".to_string()
        };
        let pinmux = config
            .pinmux(pad)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unused".to_string());
        println!("{:<6} {:<6} {:>12}", pad.index(), signal, pinmux);
    }
}

/// Parse a hex string such as `9f0102` or `9F 01 02`
fn parse_hex(s: &str) -> Result<Vec<u8>, CommandError> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    if digits.len() % 2 != 0 {
        return Err(CommandError::InvalidHex(s.to_string()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|byte| u8::from_str_radix(byte, 16).ok())
                .ok_or_else(|| CommandError::InvalidHex(s.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("9f0102").unwrap(), vec![0x9F, 0x01, 0x02]);
        assert_eq!(parse_hex("0xDE AD").unwrap(), vec![0xDE, 0xAD]);
        assert!(parse_hex("").unwrap().is_empty());
        assert!(matches!(parse_hex("abc"), Err(CommandError::InvalidHex(_))));
        assert!(matches!(parse_hex("zz"), Err(CommandError::InvalidHex(_))));
    }

    #[test]
    fn test_find_pin_names_board() {
        let db = BoardDatabase::samd21();
        let err = find_pin(&db, "PA02".parse().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "PA02 is not a SERCOM pin on ATSAMD21G18A");
    }
}
