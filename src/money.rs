// 💵 Money - parsing, rounding and rendering of console amounts
//
// Amounts are rust_decimal::Decimal. Rounding is naive: two decimal places,
// midpoint away from zero. No currency, no precision guarantees beyond that.

use crate::error::AmountInputError;
use rust_decimal::prelude::*;
use std::str::FromStr;

/// Decimal places kept for every amount typed at the ATM
pub const CENT_SCALE: u32 = 2;

/// Round to whole cents (half away from zero)
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse one line of console input into a positive, cent-rounded amount
///
/// Accepts plain (`"50.5"`) and scientific (`"1e3"`) notation. Surrounding
/// whitespace is ignored. The positivity check runs AFTER rounding, so
/// `"0.004"` is rejected as not positive.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountInputError::NotANumber);
    }

    // Decimal's parser skips '_' separators; console input must be a plain number
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E');
    if !trimmed.chars().all(allowed) {
        return Err(AmountInputError::NotANumber);
    }

    let raw = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountInputError::NotANumber)?;

    let amount = round_cents(raw);
    if amount <= Decimal::ZERO {
        return Err(AmountInputError::NotPositive);
    }

    Ok(amount)
}

/// `$1000.00` style, always two decimals
pub fn format_currency(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Plain positional notation with at least one decimal: `0.0`, `50.5`,
/// `604000000.0`. Large values are never switched to exponent form.
pub fn format_plain(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}
