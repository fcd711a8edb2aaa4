//! Exact decimal amounts
//!
//! Amounts are `rust_decimal::Decimal` values. The scale a value was written
//! with is kept, so `1500.00` is rendered back as `1500.00` and never as `1500`.

use rust_decimal::Decimal;

use crate::error::{BilancioError, BilancioResult};

/// Parse an amount as an exact decimal
///
/// Accepts plain decimal text (`"12"`, `"-3.50"`, `"+0.10"`, `".5"`) and
/// scientific notation (`"1E+3"`). Digit separators such as `1_000` are not
/// amounts. Text that would lose digits is rejected rather than rounded.
pub fn parse_amount(s: &str) -> BilancioResult<Decimal> {
    if !is_decimal_literal(s) {
        return Err(BilancioError::Parse(format!("invalid amount '{}'", s)));
    }

    let parsed = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s)
    } else {
        Decimal::from_str_exact(s)
    };
    parsed.map_err(|e| BilancioError::Parse(format!("invalid amount '{}': {}", s, e)))
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit
fn is_decimal_literal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let mantissa = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        Some(exponent) => {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !digits.is_empty() && all_digits(digits)
        }
        None => true,
    }
}

/// Ensure an amount can be stored on a movement (zero allowed, negative rejected)
pub fn validate_amount(amount: Decimal) -> BilancioResult<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BilancioError::InvalidArgument(format!(
            "amount must not be negative, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Compare two amounts by value and by number of fraction digits
pub fn same_amount(a: &Decimal, b: &Decimal) -> bool {
    a == b && a.scale() == b.scale()
}

/// Add two amounts without overflow or rounding
///
/// `Decimal` keeps 28 significant digits and drops fraction digits when a sum
/// needs more; that and overflow are both `Arithmetic` errors here.
pub fn exact_add(a: Decimal, b: Decimal) -> BilancioResult<Decimal> {
    let sum = a
        .checked_add(b)
        .ok_or_else(|| BilancioError::Arithmetic(format!("{} + {} overflows", a, b)))?;
    if sum.scale() < a.scale().max(b.scale()) {
        return Err(BilancioError::Arithmetic(format!(
            "{} + {} cannot be represented exactly",
            a, b
        )));
    }
    Ok(sum)
}

/// Parse an amount as it is typed by a user
///
/// Same grammar as [`parse_amount`], trimmed first, and negative values are rejected.
pub fn parse_user_amount(s: &str) -> BilancioResult<Decimal> {
    let amount = parse_amount(s.trim()).map_err(|_| {
        BilancioError::InvalidArgument(format!(
            "invalid amount '{}': use a non-negative number such as 100.50",
            s
        ))
    })?;
    validate_amount(amount)
}
