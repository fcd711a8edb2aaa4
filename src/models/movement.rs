//! Movement model
//!
//! A movement is one dated income or expense. Movements are plain values:
//! fields are private and there are no setters, so changing a movement means
//! removing it from the ledger and adding a new one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::amount::{same_amount, validate_amount};
use super::date::format_date;
use crate::error::{BilancioError, BilancioResult};

/// Whether a movement adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    /// Name written to the ledger files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Read a kind column from a ledger file
    ///
    /// Only the exact text `Income` is an income; anything else, typos
    /// included, is read as an expense.
    pub fn from_wire(s: &str) -> Self {
        if s == "Income" {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// Apply this kind's sign to a non-negative amount
    pub fn apply_sign(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Income => amount,
            Self::Expense if amount.is_zero() => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = BilancioError;

    /// Strict, case-insensitive parse for user input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(BilancioError::InvalidArgument(format!(
                "unknown movement kind '{}': use income or expense",
                s
            ))),
        }
    }
}

/// A dated, signed financial movement
#[derive(Debug, Clone, Serialize)]
pub struct Movement {
    date: NaiveDate,
    description: String,
    amount: Decimal,
    kind: MovementKind,
}

impl Movement {
    /// Create an income
    pub fn income(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> BilancioResult<Self> {
        Self::from_parts(
            MovementKind::Income,
            Some(date),
            Some(description.into()),
            Some(amount),
        )
    }

    /// Create an expense
    pub fn expense(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> BilancioResult<Self> {
        Self::from_parts(
            MovementKind::Expense,
            Some(date),
            Some(description.into()),
            Some(amount),
        )
    }

    /// Create a movement of the given kind from possibly missing parts
    ///
    /// Checks run in a fixed order and the first failure wins: date,
    /// then description (missing or blank), then amount (missing or negative).
    pub fn from_parts(
        kind: MovementKind,
        date: Option<NaiveDate>,
        description: Option<String>,
        amount: Option<Decimal>,
    ) -> BilancioResult<Self> {
        let date = date
            .ok_or_else(|| BilancioError::InvalidArgument("date must be provided".into()))?;

        let description = match description {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                return Err(BilancioError::InvalidArgument(
                    "description must not be empty".into(),
                ))
            }
        };

        let amount = amount
            .ok_or_else(|| BilancioError::InvalidArgument("amount must be provided".into()))?;
        let amount = validate_amount(amount)?;

        Ok(Self {
            date,
            description,
            amount,
            kind,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The unsigned amount, never negative
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == MovementKind::Expense
    }

    /// Amount with the sign of the kind applied
    pub fn signed_amount(&self) -> Decimal {
        self.kind.apply_sign(self.amount)
    }

    /// Value equality that also requires the same kind
    pub fn same_movement(&self, other: &Self) -> bool {
        self == other && self.kind == other.kind
    }
}

/// Equality looks at date, description and amount only.
///
/// The kind is ignored, so an income and an expense with the same date,
/// description and amount compare equal. `LedgerStore::remove` relies on
/// this; `LedgerStore::remove_exact` uses [`Movement::same_movement`].
impl PartialEq for Movement {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.description == other.description
            && same_amount(&self.amount, &other.amount)
    }
}

impl Eq for Movement {}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_date(self.date),
            self.description,
            self.signed_amount()
        )
    }
}
