// Bank Console - Core Library
// Exposes the ATM and Bank demo building blocks for the binaries and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod money;
pub mod session;

// Re-export commonly used types
pub use config::AtmConfig;
pub use entities::{run_demo, Account, BankAccount, Receipt, TransactionKind};
pub use error::{AccountError, AmountInputError, BankError};
pub use logging::init_tracing;
pub use money::{format_currency, format_plain, parse_amount, round_cents};
pub use session::{MenuChoice, Session, SessionOutcome, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
