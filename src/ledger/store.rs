//! In-memory ledger of movements
//!
//! Keeps movements in insertion order, allows duplicates, and answers balance
//! and date queries. The store does no locking: callers that share one across
//! threads must wrap it themselves (e.g. in a `Mutex`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{BilancioError, BilancioResult};
use crate::models::{exact_add, Movement};

use super::filter::MovementFilter;

/// Income, expense and net totals of a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    /// Sum of all income amounts
    pub income: Decimal,
    /// Sum of all expense amounts (unsigned)
    pub expense: Decimal,
    /// `income - expense`
    pub balance: Decimal,
}

/// Ordered collection of movements
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    movements: Vec<Movement>,
}

impl LedgerStore {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding `movements` in the given order
    pub fn from_movements(movements: Vec<Movement>) -> Self {
        Self { movements }
    }

    /// Append a movement at the end
    pub fn add(&mut self, movement: Movement) {
        debug!(movement = %movement, kind = %movement.kind(), "adding movement");
        self.movements.push(movement);
    }

    /// Append a movement that may be missing
    ///
    /// Fails with `InvalidArgument` on `None`, leaving the ledger unchanged.
    pub fn add_checked(&mut self, movement: Option<Movement>) -> BilancioResult<()> {
        let movement = movement
            .ok_or_else(|| BilancioError::InvalidArgument("movement must be provided".into()))?;
        self.add(movement);
        Ok(())
    }

    /// Remove the first movement equal to `movement`
    ///
    /// Equality ignores the kind: if an income and an expense share date,
    /// description and amount, whichever comes first is removed.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, movement: &Movement) -> bool {
        self.remove_first(|m| m == movement)
    }

    /// Remove the first movement equal to `movement` that also has its kind
    pub fn remove_exact(&mut self, movement: &Movement) -> bool {
        self.remove_first(|m| m.same_movement(movement))
    }

    fn remove_first(&mut self, matches: impl Fn(&Movement) -> bool) -> bool {
        match self.movements.iter().position(matches) {
            Some(index) => {
                let removed = self.movements.remove(index);
                debug!(movement = %removed, index, "removed movement");
                true
            }
            None => false,
        }
    }

    /// Replace the whole content with `movements`, keeping their order
    pub fn replace_all(&mut self, movements: Vec<Movement>) {
        debug!(
            previous = self.movements.len(),
            loaded = movements.len(),
            "replacing ledger content"
        );
        self.movements = movements;
    }

    /// Snapshot of all movements
    pub fn all(&self) -> Vec<Movement> {
        self.movements.clone()
    }

    /// Borrow the movements without copying
    pub fn iter(&self) -> impl Iterator<Item = &Movement> {
        self.movements.iter()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Exact sum of all signed amounts; zero for an empty ledger
    ///
    /// Fails with `Arithmetic` if the sum overflows or would need rounding.
    pub fn balance(&self) -> BilancioResult<Decimal> {
        self.movements
            .iter()
            .try_fold(Decimal::ZERO, |total, m| exact_add(total, m.signed_amount()))
    }

    /// Income, expense and net totals, with the same exactness as [`LedgerStore::balance`]
    pub fn totals(&self) -> BilancioResult<LedgerTotals> {
        let mut totals = LedgerTotals::default();
        for m in &self.movements {
            if m.is_income() {
                totals.income = exact_add(totals.income, m.amount())?;
            } else {
                totals.expense = exact_add(totals.expense, m.amount())?;
            }
        }
        totals.balance = exact_add(totals.income, -totals.expense)?;
        Ok(totals)
    }

    /// Movements dated exactly `date`, in ledger order
    pub fn by_date(&self, date: NaiveDate) -> Vec<Movement> {
        self.filter(&MovementFilter::new().on(date))
    }

    /// Movements with `from <= date <= to`, in ledger order
    ///
    /// An inverted range (`from > to`) simply matches nothing.
    pub fn by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<Movement> {
        self.filter(&MovementFilter::new().date_range(from, to))
    }

    /// Movements whose description contains `key`, ignoring case
    ///
    /// The key is trimmed first; an empty key matches everything.
    pub fn search(&self, key: &str) -> Vec<Movement> {
        self.filter(&MovementFilter::new().description_contains(key))
    }

    /// Movements matching every criterion of `filter`, in ledger order
    pub fn filter(&self, filter: &MovementFilter) -> Vec<Movement> {
        self.movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }
}
