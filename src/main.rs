use anyhow::Result;
use std::env;
use std::io;

use bank_console::{init_tracing, AtmConfig, Session};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    // Optional single argument: path to a JSON config file
    let config = match args.get(1) {
        Some(path) => AtmConfig::from_file(path)?,
        None => AtmConfig::default(),
    };
    info!(version = bank_console::VERSION, "ATM starting");

    let mut account = config.build_account();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        &mut account,
        stdin.lock(),
        stdout.lock(),
        config.max_pin_attempts,
    );

    // Lockout and exhausted attempts are designed endings, not failures
    session.run()?;

    Ok(())
}
