// Entity Models
//
// - account: PIN-gated ATM account (stateful, lockout rules)
// - bank: plain BankAccount used by the scripted Bank demo

pub mod account;
pub mod bank;

pub use account::{Account, Receipt, TransactionKind};
pub use bank::{run_demo, BankAccount};
