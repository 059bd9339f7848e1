//! # CLI Layer
//!
//! This module is **one possible UI client** for craic. It is the only place
//! that knows about terminal I/O, argument parsing and exit codes.
//!
//! Each invocation:
//! 1. Parses arguments with clap and sets up logging and colors
//! 2. Resolves the store for the chosen scope (`craic::init`)
//! 3. Restores the selection saved by the previous invocation
//! 4. Dispatches to a `CraicApi` method and prints the `CmdResult`
//! 5. Saves the selection again
//!
//! Business logic is tested in the library. Tests here cover argument parsing
//! and rendering. The binary as a whole is exercised from `tests/`.

mod commands;
mod logging;
mod print;
mod setup;

pub use commands::run;
