//! CLI argument parsing

use clap::{Parser, Subcommand};
use padmux_core::{InstanceId, PinId};
use std::path::PathBuf;

/// Default SPI bit rate in Hz
pub const DEFAULT_BAUDRATE: u32 = 1_000_000;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

#[derive(Parser)]
#[command(name = "padmux")]
#[command(author, version, about = "SERCOM pad resolver for SPI", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Board description file (RON). Defaults to the built-in ATSAMD21G18A table
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// SPI pin selection shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct SpiPinArgs {
    /// Clock pin (e.g. PA17)
    #[arg(long)]
    pub sck: PinId,

    /// Data-out pin (e.g. PA16)
    #[arg(long)]
    pub mosi: PinId,

    /// Data-in pin (e.g. PA19)
    #[arg(long)]
    pub miso: PinId,

    /// Bit rate in Hz (decimal or 0x hex)
    #[arg(long, default_value_t = DEFAULT_BAUDRATE, value_parser = parse_hex_u32)]
    pub baudrate: u32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the SERCOM wiring for three SPI pins
    Resolve {
        #[command(flatten)]
        pins: SpiPinArgs,

        /// Instances to treat as already enabled (comma-separated, e.g. SERCOM1,SERCOM3)
        #[arg(long, value_delimiter = ',')]
        busy: Vec<InstanceId>,
    },

    /// List the pin table
    Pins,

    /// Bring up a bus on the in-memory emulator and loop data through it
    Loopback {
        #[command(flatten)]
        pins: SpiPinArgs,

        /// Bytes to send, as hex (e.g. 9f0102)
        #[arg(long, default_value = "9f0102")]
        data: String,
    },
}
