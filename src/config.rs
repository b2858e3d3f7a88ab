// ⚙️ ATM Configuration - the account the machine is loaded with
//
// Defaults reproduce the built-in demo account. A JSON file may override any
// field; missing fields keep their defaults.

use crate::entities::Account;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmConfig {
    /// Account identifier (log fields only, never printed to the console)
    pub account_number: String,

    /// Shared secret compared verbatim against the trimmed input line
    pub pin: String,

    pub opening_balance: Decimal,

    /// PIN prompts per session (the account itself locks after 3 failures)
    pub max_pin_attempts: u32,
}

impl Default for AtmConfig {
    fn default() -> Self {
        AtmConfig {
            account_number: "1234567890".to_string(),
            pin: "9931".to_string(),
            opening_balance: Decimal::new(100_000, 2),
            max_pin_attempts: 3,
        }
    }
}

impl AtmConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    /// Parse and validate config JSON
    pub fn from_json(content: &str) -> Result<Self> {
        let config: AtmConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pin.trim().is_empty() {
            bail!("pin must not be empty");
        }
        if self.opening_balance < Decimal::ZERO {
            bail!("opening_balance must not be negative: {}", self.opening_balance);
        }
        if self.max_pin_attempts == 0 {
            bail!("max_pin_attempts must be at least 1");
        }
        Ok(())
    }

    /// Build the account this config describes
    pub fn build_account(&self) -> Account {
        Account::new(
            self.account_number.clone(),
            self.pin.clone(),
            self.opening_balance,
        )
    }
}
