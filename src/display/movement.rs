//! Movement display formatting
//!
//! Provides utilities for formatting movements for terminal display.

use rust_decimal::Decimal;

use crate::ledger::LedgerTotals;
use crate::models::{format_date, Movement};

/// Format a single movement as a register row
pub fn format_movement_row(movement: &Movement, currency: &str) -> String {
    format!(
        "{:10}  {:30} {:>14}  {}",
        format_date(movement.date()),
        truncate(movement.description(), 30),
        format_amount(movement.signed_amount(), currency),
        movement.kind()
    )
}

/// Format a list of movements as a numbered register
pub fn format_movement_register(movements: &[Movement], currency: &str) -> String {
    if movements.is_empty() {
        return "No movements found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:10}  {:30} {:>14}  {}\n",
        "#", "Data", "Descrizione", "Ammontare", "Tipo"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for (i, movement) in movements.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {}\n",
            i + 1,
            format_movement_row(movement, currency)
        ));
    }

    output
}

/// Balance line, e.g. `Saldo: 900.00`
pub fn format_balance(balance: Decimal) -> String {
    format!("Saldo: {}", balance)
}

/// Income, expense and balance summary
pub fn format_totals(totals: &LedgerTotals, currency: &str) -> String {
    format!(
        "Entrate: {}\nUscite:  {}\n{}\n",
        format_amount(totals.income, currency),
        format_amount(totals.expense, currency),
        format_balance(totals.balance)
    )
}

/// Amount with currency symbol, sign first: `-€600.00`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", currency, amount.abs())
    } else {
        format!("{}{}", currency, amount)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
