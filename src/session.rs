// 🏧 ATM Session - line-based console state machine
//
// Unauthenticated → Authenticated → Terminated
//
// - Unauthenticated: PIN prompts, bounded by max_attempts. A lockout ends the
//   session at once, whatever attempts are left.
// - Authenticated: 4-option menu loop. Bad menu input just reprints the menu.
// - Terminated: exit selected, login denied, or input closed (EOF).
//
// Generic over BufRead/Write so the whole protocol runs against in-memory
// buffers in tests.

use crate::entities::Account;
use crate::error::AccountError;
use crate::money::{format_currency, parse_amount};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ============================================================================
// STATES AND OUTCOMES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Terminated,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// User selected Exit from the menu
    Completed,

    /// Account was (or became) locked during login
    LockedOut,

    /// Ran out of PIN attempts without locking the account
    AttemptsExhausted,

    /// Input stream ended before the session finished
    InputClosed,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::LockedOut => "locked_out",
            SessionOutcome::AttemptsExhausted => "attempts_exhausted",
            SessionOutcome::InputClosed => "input_closed",
        }
    }
}

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CheckBalance,
    Deposit,
    Withdraw,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::CheckBalance),
            "2" => Ok(MenuChoice::Deposit),
            "3" => Ok(MenuChoice::Withdraw),
            "4" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

enum Login {
    Granted,
    Denied(SessionOutcome),
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session<'a, R, W> {
    id: Uuid,
    account: &'a mut Account,
    input: R,
    output: W,
    max_attempts: u32,
    state: SessionState,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(account: &'a mut Account, input: R, output: W, max_attempts: u32) -> Self {
        Session {
            id: Uuid::new_v4(),
            account,
            input,
            output,
            max_attempts,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to completion
    ///
    /// Domain errors are printed and never returned; only console I/O
    /// failures come back as `Err`.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let span = info_span!("atm_session", session_id = %self.id);
        let _guard = span.enter();

        writeln!(self.output, " WELCOME TO RUST BANK ATM ")?;

        let outcome = match self.authenticate()? {
            Login::Granted => self.main_menu()?,
            Login::Denied(outcome) => outcome,
        };

        match outcome {
            SessionOutcome::Completed => {
                writeln!(self.output, "\nThank you for using Rust Bank ATM. Have a nice day!")?
            }
            _ => writeln!(self.output, "ATM session terminated.")?,
        }
        self.output.flush().context("Failed to flush console output")?;

        self.state = SessionState::Terminated;
        info!(outcome = outcome.as_str(), "Session ended");
        Ok(outcome)
    }

    // ------------------------------------------------------------------------
    // Console helpers
    // ------------------------------------------------------------------------

    /// Print a prompt and read one line; `None` on EOF
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush().context("Failed to flush console output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read console input")?;
        if read == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reprompt until a positive, cent-rounded amount is entered
    fn read_amount(&mut self, prompt: &str) -> Result<Option<Decimal>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse_amount(&line) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    // ------------------------------------------------------------------------
    // Unauthenticated
    // ------------------------------------------------------------------------

    fn authenticate(&mut self) -> Result<Login> {
        writeln!(self.output, "\n ACCOUNT LOGIN ")?;

        let mut attempts = 0;
        while attempts < self.max_attempts {
            let Some(pin) = self.prompt("Enter your 4-digit PIN: ")? else {
                return Ok(Login::Denied(SessionOutcome::InputClosed));
            };

            match self.account.validate_pin(&pin) {
                Ok(()) => {
                    writeln!(self.output, "Login successful!")?;
                    self.state = SessionState::Authenticated;
                    return Ok(Login::Granted);
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;

                    if e.is_lockout() {
                        writeln!(self.output, "Account locked. Terminating session.")?;
                        return Ok(Login::Denied(SessionOutcome::LockedOut));
                    }

                    attempts += 1;
                    if attempts == self.max_attempts {
                        warn!(attempts, "Maximum login attempts reached");
                        writeln!(
                            self.output,
                            "Maximum login attempts reached. Terminating session."
                        )?;
                        return Ok(Login::Denied(SessionOutcome::AttemptsExhausted));
                    }
                }
            }
        }

        Ok(Login::Denied(SessionOutcome::AttemptsExhausted))
    }

    // ------------------------------------------------------------------------
    // Authenticated
    // ------------------------------------------------------------------------

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== MAIN MENU ===")?;
        writeln!(self.output, "1. Check Balance")?;
        writeln!(self.output, "2. Deposit Money")?;
        writeln!(self.output, "3. Withdraw Money")?;
        writeln!(self.output, "4. Exit")?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<SessionOutcome> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Select an option (1-4): ")? else {
                return Ok(SessionOutcome::InputClosed);
            };

            let flow = match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::CheckBalance) => self.check_balance()?,
                Ok(MenuChoice::Deposit) => self.deposit_money()?,
                Ok(MenuChoice::Withdraw) => self.withdraw_money()?,
                Ok(MenuChoice::Exit) => ControlFlow::Break(SessionOutcome::Completed),
                Err(()) => {
                    writeln!(self.output, "Invalid option. Please select 1-4.")?;
                    ControlFlow::Continue(())
                }
            };

            if let ControlFlow::Break(outcome) = flow {
                return Ok(outcome);
            }
        }
    }

    fn check_balance(&mut self) -> Result<ControlFlow<SessionOutcome>> {
        writeln!(self.output, "\n--- BALANCE INQUIRY ---")?;
        let balance = self.account.check_balance();
        writeln!(self.output, "Current balance: {}", format_currency(balance))?;
        Ok(ControlFlow::Continue(()))
    }

    fn deposit_money(&mut self) -> Result<ControlFlow<SessionOutcome>> {
        writeln!(self.output, "\n--- DEPOSIT MONEY ---")?;
        let Some(amount) = self.read_amount("Enter deposit amount: $")? else {
            return Ok(ControlFlow::Break(SessionOutcome::InputClosed));
        };

        match self.account.deposit(amount) {
            Ok(receipt) => {
                writeln!(self.output, "Successfully deposited {}", format_currency(receipt.amount))?;
                writeln!(self.output, "Transaction completed successfully.")?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn withdraw_money(&mut self) -> Result<ControlFlow<SessionOutcome>> {
        writeln!(self.output, "\n--- WITHDRAW MONEY ---")?;
        let Some(amount) = self.read_amount("Enter withdrawal amount: $")? else {
            return Ok(ControlFlow::Break(SessionOutcome::InputClosed));
        };

        match self.account.withdraw(amount) {
            Ok(receipt) => {
                writeln!(self.output, "Successfully withdrew {}", format_currency(receipt.amount))?;
                writeln!(self.output, "Transaction completed successfully.")?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn report_failure(&mut self, error: &AccountError) -> Result<()> {
        debug!(%error, "Transaction rejected");
        writeln!(self.output, "Transaction failed: {}", error)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
