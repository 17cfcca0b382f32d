/// i2pkeys - destination key tool
///
/// Generates destinations through a router's control channel, stores them
/// as two-line key files, and converts between the full and short forms.

use anyhow::Result;
use std::io::{self, BufWriter, Write};
use tracing::Level;

use i2pkeys_cli::{commands, Args};

/// Environment variable selecting the log level
const LOG_ENV: &str = "DEBUG_I2P";

fn main() -> Result<()> {
    init_logging();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with 'help' to see available commands");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    commands::run(args, stdin.lock(), &mut out)?;
    out.flush()?;

    Ok(())
}

/// Silent unless DEBUG_I2P is set; logs go to stderr
fn init_logging() {
    let Ok(level) = std::env::var(LOG_ENV) else {
        return;
    };
    if level.is_empty() {
        return;
    }

    let level = match level.to_lowercase().as_str() {
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(%level, "logging enabled");
}
