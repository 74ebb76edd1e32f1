//! padmux - SERCOM pad resolver for SPI
//!
//! Works out which SERCOM can drive an SPI bus on a given clock, data-out
//! and data-in pin, and prints the wiring (pad pinmux codes, DOPO/DIPO)
//! the peripheral has to be programmed with.
//!
//! # Architecture
//!
//! All resolution logic lives in `padmux-core`, which is `no_std` and can be
//! linked into firmware unchanged. This binary only adds board selection,
//! argument parsing and output, plus a loopback mode that runs the full
//! bus lifecycle against the `padmux-dummy` emulator.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use padmux_core::board::BoardDatabase;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG directives still apply on top of the verbosity level
    logger_builder(cli.verbose).parse_default_env().init();

    let db = match load_board(cli.board.as_deref()) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to load board description: {}", e);
            std::process::exit(1);
        }
    };

    log::debug!(
        "Using {} ({} pins, {} instances)",
        db.chip(),
        db.pins().len(),
        db.instance_count()
    );

    match cli.command {
        Commands::Resolve { pins, busy } => commands::run_resolve(&db, &pins, &busy)?,
        Commands::Pins => commands::list_pins(&db),
        Commands::Loopback { pins, data } => commands::run_loopback(&db, &pins, &data)?,
    }

    Ok(())
}

/// Log level for the given number of `-v` flags
fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn logger_builder(verbose: u8) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbose));
    builder
}

/// Load the board description from the given path or fall back to the
/// built-in table
fn load_board(path: Option<&Path>) -> Result<BoardDatabase, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path.is_file() => Ok(BoardDatabase::load_file(path)?),
        Some(path) => Err(format!("Board description not found: {}", path.display()).into()),
        None => Ok(BoardDatabase::samd21()),
    }
}
