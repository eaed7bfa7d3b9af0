//! Binary entry point: bring up logging, resolve configuration, open the
//! SQLite-backed store and hand the terminal to the menu loop.
use std::io;

use crossterm::tty::IsTty;
use env_logger::Env;
use trip_booking::{BookingStore, Config, Shell};

/// Returning a `Result` bubbles fatal startup and store failures up to the
/// terminal with their full context chain.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Config::from_env()?;
    log::info!("using database {}", config.database_path.display());
    let store = BookingStore::open(&config)?;

    let stdout = io::stdout();
    let color = stdout.is_tty();
    let mut shell = Shell::new(&store, io::stdin().lock(), stdout.lock(), color);
    shell.run()
}
