/// i2pkeys command-line tool library
///
/// Argument parsing and the command implementations behind the `i2pkeys`
/// binary, kept out of `main.rs` so they can be tested.

pub mod args;
pub mod commands;

pub use args::{Args, CommandLine};
