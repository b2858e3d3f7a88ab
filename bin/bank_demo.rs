// Bank Demo - scripted, non-interactive walk through BankAccount

use anyhow::{Context, Result};
use bank_console::{init_tracing, run_demo};
use std::io::{self, Write};

fn main() -> Result<()> {
    init_tracing();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_demo(&mut out).context("Failed to write demo output")?;
    out.flush()?;

    Ok(())
}
