// 🏦 BankAccount Entity - the non-interactive Bank demo
//
// Same deposit/withdraw shape as the ATM account, no PIN, no locking.
//
// Known quirk, kept on purpose: withdraw has NO lower-bound check. Zero or
// negative amounts pass as long as they are <= balance (a negative withdrawal
// grows the balance). It is flagged with a warning instead of being fixed.

use crate::error::BankError;
use crate::money::format_plain;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::warn;

// ============================================================================
// BANK ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_number: i64,
    pub holder_name: String,
    pub balance: Decimal,
}

impl BankAccount {
    pub fn new(account_number: i64, holder_name: String, balance: Decimal) -> Self {
        BankAccount {
            account_number,
            holder_name,
            balance,
        }
    }

    /// Deposit a strictly positive amount, returns the new balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidDeposit);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::AmountTooLarge)?;
        Ok(self.balance)
    }

    /// Withdraw any amount up to and including the balance, returns the new balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount > self.balance {
            return Err(BankError::InsufficientBalance {
                balance: self.balance,
            });
        }
        if amount <= Decimal::ZERO {
            warn!(
                account = self.account_number,
                %amount,
                "Non-positive withdrawal accepted (no lower-bound check)"
            );
        }
        // a negative amount grows the balance and can overflow
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::AmountTooLarge)?;
        Ok(self.balance)
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n--- Account Details ---")?;
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Holder Name:    {}", self.holder_name)?;
        writeln!(f, "Current Balance:{}", format_plain(self.balance))?;
        writeln!(f, "-----------------------")
    }
}

// ============================================================================
// SCRIPTED DEMO
// ============================================================================

fn report_deposit<W: Write>(out: &mut W, account: &mut BankAccount, amount: Decimal) -> std::io::Result<()> {
    match account.deposit(amount) {
        Ok(balance) => {
            writeln!(out, "Deposited: {}", format_plain(amount))?;
            writeln!(out, "Avl Balance: {}", format_plain(balance))
        }
        Err(e) => writeln!(out, "{}", e),
    }
}

fn report_withdraw<W: Write>(out: &mut W, account: &mut BankAccount, amount: Decimal) -> std::io::Result<()> {
    match account.withdraw(amount) {
        Ok(balance) => {
            writeln!(out, "Withdrawn: {}", format_plain(amount))?;
            writeln!(out, "Avl Balance: {}", format_plain(balance))
        }
        Err(e) => writeln!(out, "{}", e),
    }
}

/// Fixed demo: a default account, then one funded account with a deposit and
/// a withdrawal. Returns both accounts in their final state.
pub fn run_demo<W: Write>(out: &mut W) -> std::io::Result<(BankAccount, BankAccount)> {
    let default_account = BankAccount::default();
    writeln!(out, "{}", default_account)?;

    let mut funded = BankAccount::new(5, "santosh".to_string(), Decimal::new(600_000_000, 0));
    report_deposit(out, &mut funded, Decimal::new(4_000_000, 0))?;
    report_withdraw(out, &mut funded, Decimal::new(17_000_000, 0))?;
    writeln!(out, "{}", funded)?;

    Ok((default_account, funded))
}

// ============================================================================
// TESTS
// ============================================================================
