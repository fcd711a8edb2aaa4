//! Movement filters
//!
//! A builder of optional criteria; a movement matches when it satisfies all
//! of the criteria that are set.

use chrono::NaiveDate;

use crate::models::{Movement, MovementKind};

/// Options for filtering movements
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Filter by date range start (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Filter by kind
    pub kind: Option<MovementKind>,
    /// Lowercased description fragment
    pub description: Option<String>,
}

impl MovementFilter {
    /// Create a new empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by a single day
    pub fn on(self, date: NaiveDate) -> Self {
        self.date_range(date, date)
    }

    /// Filter by date range, both ends inclusive
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by case-insensitive description fragment (trimmed)
    pub fn description_contains(mut self, key: &str) -> Self {
        self.description = Some(key.trim().to_lowercase());
        self
    }

    /// Check a movement against every criterion
    pub fn matches(&self, movement: &Movement) -> bool {
        if let Some(start) = self.start_date {
            if movement.date() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if movement.date() > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if movement.kind() != kind {
                return false;
            }
        }
        if let Some(key) = &self.description {
            if !movement.description().to_lowercase().contains(key.as_str()) {
                return false;
            }
        }
        true
    }
}
