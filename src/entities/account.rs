// 💳 Account Entity - PIN-gated ledger behind the ATM
//
// "The PIN is the gate, the balance is the value behind it"
//
// Rules:
// - 3 cumulative PIN failures lock the account for the process lifetime
// - A correct PIN before the third failure resets the counter
// - Only deposit/withdraw move the balance, and only by positive amounts
// - Unlocking is out-of-band (reset_failed_attempts), never from the session

use crate::error::AccountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

// ============================================================================
// TRANSACTION KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }

    /// Human label used in messages ("Deposit amount must be positive.")
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// Outcome of a successful deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub kind: TransactionKind,

    /// Amount moved (always positive)
    pub amount: Decimal,

    /// Balance right after the transaction
    pub balance_after: Decimal,
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// ATM account: balance behind a PIN with a lockout counter
///
/// Fields are private; every mutation goes through the operations below so
/// the lock and balance rules cannot be bypassed.
#[derive(Clone)]
pub struct Account {
    account_number: String,
    pin: String,
    balance: Decimal,
    failed_pin_attempts: u32,
    is_locked: bool,
}

impl Account {
    /// Failures that lock the account
    pub const MAX_FAILED_ATTEMPTS: u32 = 3;

    pub fn new(account_number: String, pin: String, opening_balance: Decimal) -> Self {
        Account {
            account_number,
            pin,
            balance: opening_balance,
            failed_pin_attempts: 0,
            is_locked: false,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn failed_pin_attempts(&self) -> u32 {
        self.failed_pin_attempts
    }

    /// Check a PIN against the account
    ///
    /// # Returns
    /// * `Ok(())` - PIN matches, failure counter reset to 0
    /// * `Err(AccountError::Locked)` - account was already locked (input ignored)
    /// * `Err(AccountError::LockedAfterFailures)` - this mismatch locked the account
    /// * `Err(AccountError::WrongPin)` - mismatch, with attempts remaining
    pub fn validate_pin(&mut self, input: &str) -> Result<(), AccountError> {
        if self.is_locked {
            warn!(account = %self.account_number, "PIN attempt on locked account");
            return Err(AccountError::Locked);
        }

        if input == self.pin {
            self.failed_pin_attempts = 0;
            info!(account = %self.account_number, "PIN accepted");
            return Ok(());
        }

        self.failed_pin_attempts += 1;

        if self.failed_pin_attempts >= Self::MAX_FAILED_ATTEMPTS {
            self.is_locked = true;
            warn!(
                account = %self.account_number,
                failures = self.failed_pin_attempts,
                "Account locked"
            );
            Err(AccountError::LockedAfterFailures(Self::MAX_FAILED_ATTEMPTS))
        } else {
            let attempts_remaining = Self::MAX_FAILED_ATTEMPTS - self.failed_pin_attempts;
            debug!(account = %self.account_number, attempts_remaining, "PIN rejected");
            Err(AccountError::WrongPin { attempts_remaining })
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                kind: TransactionKind::Deposit,
            });
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::AmountTooLarge {
                kind: TransactionKind::Deposit,
            })?;
        info!(account = %self.account_number, kind = TransactionKind::Deposit.as_str(), %amount, balance = %self.balance, "Transaction applied");

        Ok(Receipt {
            kind: TransactionKind::Deposit,
            amount,
            balance_after: self.balance,
        })
    }

    /// Withdraw `amount`; `amount == balance` is allowed (empties the account)
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                kind: TransactionKind::Withdrawal,
            });
        }

        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        info!(account = %self.account_number, kind = TransactionKind::Withdrawal.as_str(), %amount, balance = %self.balance, "Transaction applied");

        Ok(Receipt {
            kind: TransactionKind::Withdrawal,
            amount,
            balance_after: self.balance,
        })
    }

    /// Current balance (pure read)
    pub fn check_balance(&self) -> Decimal {
        self.balance
    }

    /// Administrative unlock: clears the failure counter and the lock
    pub fn reset_failed_attempts(&mut self) {
        info!(account = %self.account_number, "Failed attempts reset");
        self.failed_pin_attempts = 0;
        self.is_locked = false;
    }
}

// PIN never shows up in debug output or logs
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("account_number", &self.account_number)
            .field("pin", &"****")
            .field("balance", &self.balance)
            .field("failed_pin_attempts", &self.failed_pin_attempts)
            .field("is_locked", &self.is_locked)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_account() -> Account {
        Account::new("1234567890".to_string(), "9931".to_string(), d("1000.0"))
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account();

        assert_eq!(account.account_number(), "1234567890");
        assert_eq!(account.balance(), d("1000.0"));
        assert_eq!(account.failed_pin_attempts(), 0);
        assert!(!account.is_locked());
    }

    #[test]
    fn test_correct_pin() {
        let mut account = create_test_account();
        assert_eq!(account.validate_pin("9931"), Ok(()));
        assert_eq!(account.failed_pin_attempts(), 0);
    }

    #[test]
    fn test_wrong_pin_counts_down() {
        let mut account = create_test_account();

        assert_eq!(
            account.validate_pin("0000"),
            Err(AccountError::WrongPin { attempts_remaining: 2 })
        );
        assert_eq!(
            account.validate_pin("1111"),
            Err(AccountError::WrongPin { attempts_remaining: 1 })
        );
        assert_eq!(account.failed_pin_attempts(), 2);
        assert!(!account.is_locked());
    }

    #[test]
    fn test_three_wrong_pins_lock_account() {
        let mut account = create_test_account();

        let _ = account.validate_pin("0000");
        let _ = account.validate_pin("1111");
        assert_eq!(
            account.validate_pin("2222"),
            Err(AccountError::LockedAfterFailures(3))
        );
        assert!(account.is_locked());

        // Correct PIN is still rejected once locked
        assert_eq!(account.validate_pin("9931"), Err(AccountError::Locked));
        assert!(account.is_locked());
    }

    #[test]
    fn test_correct_pin_resets_counter() {
        let mut account = create_test_account();

        let _ = account.validate_pin("0000");
        let _ = account.validate_pin("1111");
        assert_eq!(account.failed_pin_attempts(), 2);

        assert!(account.validate_pin("9931").is_ok());
        assert_eq!(account.failed_pin_attempts(), 0);

        // Two more failures are not enough to lock after the reset
        let _ = account.validate_pin("0000");
        let _ = account.validate_pin("1111");
        assert!(!account.is_locked());
    }

    #[test]
    fn test_reset_failed_attempts_unlocks() {
        let mut account = create_test_account();
        for pin in ["0000", "1111", "2222"] {
            let _ = account.validate_pin(pin);
        }
        assert!(account.is_locked());

        account.reset_failed_attempts();

        assert!(!account.is_locked());
        assert_eq!(account.failed_pin_attempts(), 0);
        assert!(account.validate_pin("9931").is_ok());
    }

    #[test]
    fn test_deposit() {
        let mut account = create_test_account();
        let receipt = account.deposit(d("50.5")).unwrap();

        assert_eq!(receipt.kind, TransactionKind::Deposit);
        assert_eq!(receipt.amount, d("50.5"));
        assert_eq!(receipt.balance_after, d("1050.5"));
        assert_eq!(account.balance(), d("1050.5"));
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut account = Account::new("1".to_string(), "9931".to_string(), Decimal::MAX);

        assert_eq!(
            account.deposit(Decimal::ONE),
            Err(AccountError::AmountTooLarge { kind: TransactionKind::Deposit })
        );
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_withdraw_over_balance_rejected() {
        let mut account = create_test_account();
        let result = account.withdraw(d("1500"));

        assert_eq!(
            result,
            Err(AccountError::InsufficientFunds {
                requested: d("1500"),
                available: d("1000.0"),
            })
        );
        assert_eq!(account.balance(), d("1000.0"));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = create_test_account();
        let receipt = account.withdraw(d("1000")).unwrap();

        assert_eq!(receipt.balance_after, Decimal::ZERO);
        assert_eq!(account.check_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut account = create_test_account();

        assert_eq!(
            account.deposit(Decimal::ZERO),
            Err(AccountError::InvalidAmount { kind: TransactionKind::Deposit })
        );
        assert_eq!(
            account.withdraw(d("-1")),
            Err(AccountError::InvalidAmount { kind: TransactionKind::Withdrawal })
        );
        assert_eq!(account.balance(), d("1000.0"));
    }

    #[test]
    fn test_debug_hides_pin() {
        let rendered = format!("{:?}", create_test_account());
        assert!(!rendered.contains("9931"));
        assert!(rendered.contains("1234567890"));
    }

    #[test]
    fn test_receipt_serializes() {
        let mut account = create_test_account();
        let receipt = account.withdraw(d("25.00")).unwrap();
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["kind"], "Withdrawal");
        assert_eq!(json["amount"], "25.00");
        assert_eq!(json["balance_after"], "975.00");
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (-1_000_000i64..=1_000_000i64).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #[test]
        fn test_prop_non_positive_deposit_rejected(amount in cents()) {
            prop_assume!(amount <= Decimal::ZERO);
            let mut account = create_test_account();
            prop_assert!(account.deposit(amount).is_err());
            prop_assert!(account.withdraw(amount).is_err());
            prop_assert_eq!(account.balance(), d("1000.0"));
        }

        #[test]
        fn test_prop_withdraw_respects_balance(amount in cents()) {
            prop_assume!(amount > Decimal::ZERO);
            let mut account = create_test_account();
            let before = account.balance();

            match account.withdraw(amount) {
                Ok(receipt) => {
                    prop_assert!(amount <= before);
                    prop_assert_eq!(account.balance(), before - amount);
                    prop_assert_eq!(receipt.balance_after, before - amount);
                }
                Err(err) => {
                    prop_assert!(amount > before);
                    let is_insufficient = matches!(err, AccountError::InsufficientFunds { .. });
                    prop_assert!(is_insufficient);
                    prop_assert_eq!(account.balance(), before);
                }
            }
        }

        #[test]
        fn test_prop_deposit_adds_exactly(amount in cents()) {
            prop_assume!(amount > Decimal::ZERO);
            let mut account = create_test_account();
            account.deposit(amount).unwrap();
            prop_assert_eq!(account.balance(), d("1000.0") + amount);
        }
    }
}
