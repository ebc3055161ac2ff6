//! Pay period representation
//!
//! A pay period runs from one (adjusted) payday up to the day before the
//! next one. Periods are plain values: navigation builds new ones.

use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::error::{LedgerError, LedgerResult};

/// Day of the month on which salary is paid (1-31)
///
/// Days past the end of a short month are clamped to its last day when the
/// payday is resolved, so 31 is a valid "last day of the month" payday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Payday(u32);

impl Payday {
    pub const MAX: u32 = 31;

    /// Create a payday, rejecting values outside 1..=31
    pub fn new(day: u32) -> LedgerResult<Self> {
        if !(1..=Self::MAX).contains(&day) {
            return Err(LedgerError::day_out_of_range("payday", day, Self::MAX));
        }
        Ok(Self(day))
    }

    /// The configured day of month
    pub const fn day(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Payday {
    type Error = LedgerError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<Payday> for u32 {
    fn from(payday: Payday) -> Self {
        payday.0
    }
}

impl fmt::Display for Payday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where to move a payday that lands on a weekend or holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaydayAdjustment {
    /// Pay on the nearest earlier business day
    #[default]
    BeforeWeekend,
    /// Pay on the nearest later business day
    AfterWeekend,
}

impl PaydayAdjustment {
    /// Signed step, in days, taken while looking for a business day
    pub fn step(&self) -> Duration {
        match self {
            Self::BeforeWeekend => Duration::days(-1),
            Self::AfterWeekend => Duration::days(1),
        }
    }
}

impl fmt::Display for PaydayAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeWeekend => write!(f, "Before weekend"),
            Self::AfterWeekend => write!(f, "After weekend"),
        }
    }
}

/// A closed date interval `[start_date, end_date]` between two paydays
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_text: String,
}

impl PayPeriod {
    /// Create a period, rendering its display text with a strftime format
    ///
    /// A format chrono cannot render falls back to ISO dates.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, date_format: &str) -> Self {
        let display_text = format!(
            "{} ~ {}",
            render_date(start_date, date_format),
            render_date(end_date, date_format)
        );
        Self {
            start_date,
            end_date,
            display_text,
        }
    }

    /// Check if a date falls within this period (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days covered by the period
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Reject strftime formats containing specifiers chrono does not know
pub fn check_date_format(date_format: &str) -> LedgerResult<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(LedgerError::Config(format!(
            "invalid date format '{}'",
            date_format
        )));
    }
    Ok(())
}

fn render_date(date: NaiveDate, date_format: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(date_format)) {
        Ok(()) => rendered,
        Err(_) => date.to_string(),
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text)
    }
}

impl Ord for PayPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date
            .cmp(&other.start_date)
            .then(self.end_date.cmp(&other.end_date))
    }
}

impl PartialOrd for PayPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
