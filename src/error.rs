// ⚠️ Error Taxonomy - every failure the ATM and the Bank demo can report
//
// Domain errors are values, never panics. The session catches each one at
// the point of use and prints its message; only console I/O failures travel
// up to `main` (as anyhow::Error).

use crate::entities::TransactionKind;
use crate::money::format_currency;
use rust_decimal::Decimal;
use thiserror::Error;

// ============================================================================
// ACCOUNT ERRORS (ATM)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    /// PIN mismatch that did not (yet) lock the account
    #[error("Invalid PIN. {attempts_remaining} attempt(s) remaining.")]
    WrongPin { attempts_remaining: u32 },

    /// The mismatch that pushed the failure counter to the threshold
    #[error("Account locked due to {0} failed attempts. Please contact customer service.")]
    LockedAfterFailures(u32),

    /// Any validation attempt against an already locked account
    #[error("Account is locked. Please contact customer service.")]
    Locked,

    #[error("Insufficient funds. You tried to withdraw {} but only have {}", format_currency(*requested), format_currency(*available))]
    InsufficientFunds { requested: Decimal, available: Decimal },

    #[error("{} amount must be positive.", kind.label())]
    InvalidAmount { kind: TransactionKind },

    /// Resulting balance would not fit in a Decimal
    #[error("{} amount is too large.", kind.label())]
    AmountTooLarge { kind: TransactionKind },
}

impl AccountError {
    /// True for both lock variants: the session must terminate on these
    pub fn is_lockout(&self) -> bool {
        matches!(
            self,
            AccountError::Locked | AccountError::LockedAfterFailures(_)
        )
    }

    /// True for the InvalidPin family (wrong PIN or either lock)
    pub fn is_pin_error(&self) -> bool {
        matches!(self, AccountError::WrongPin { .. }) || self.is_lockout()
    }
}

// ============================================================================
// AMOUNT INPUT ERRORS (console parsing)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountInputError {
    #[error("Invalid amount. Please enter a valid number.")]
    NotANumber,

    #[error("Amount must be greater than 0. Please try again.")]
    NotPositive,
}

// ============================================================================
// BANK DEMO ERRORS
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankError {
    #[error("Invalid deposit amount.")]
    InvalidDeposit,

    #[error("Insufficient balance{}", crate::money::format_plain(*balance))]
    InsufficientBalance { balance: Decimal },

    #[error("Amount too large.")]
    AmountTooLarge,
}
