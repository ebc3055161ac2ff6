//! Recurring transaction definitions
//!
//! A definition describes a transaction that repeats monthly on a day of the
//! month or weekly on a day of the week. The pattern enum carries only the
//! field that applies to it, so a monthly rule can never hold a weekday.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, RecurringId};
use super::money::Money;
use super::period::PaydayAdjustment;
use super::transaction::{Transaction, TransactionKind};
use crate::error::{LedgerError, LedgerResult};

/// What to do when a monthly due day falls on a weekend or holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekendHandling {
    #[default]
    AsIs,
    PreviousWeekday,
    NextWeekday,
}

impl WeekendHandling {
    /// The business-day walk this handling corresponds to, if any
    pub fn adjustment(&self) -> Option<PaydayAdjustment> {
        match self {
            Self::AsIs => None,
            Self::PreviousWeekday => Some(PaydayAdjustment::BeforeWeekend),
            Self::NextWeekday => Some(PaydayAdjustment::AfterWeekend),
        }
    }
}

/// How often a definition repeats
///
/// Deserialization goes through [`RecurrencePattern::monthly`], so a stored
/// day of month outside 1..=31 is rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    try_from = "StoredRecurrencePattern"
)]
pub enum RecurrencePattern {
    Monthly {
        day_of_month: u32,
        #[serde(default)]
        weekend_handling: WeekendHandling,
    },
    Weekly {
        day_of_week: Weekday,
    },
}

/// Wire shape of [`RecurrencePattern`] before validation
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StoredRecurrencePattern {
    Monthly {
        day_of_month: u32,
        #[serde(default)]
        weekend_handling: WeekendHandling,
    },
    Weekly {
        day_of_week: Weekday,
    },
}

impl TryFrom<StoredRecurrencePattern> for RecurrencePattern {
    type Error = LedgerError;

    fn try_from(stored: StoredRecurrencePattern) -> Result<Self, Self::Error> {
        match stored {
            StoredRecurrencePattern::Monthly {
                day_of_month,
                weekend_handling,
            } => Self::monthly(day_of_month, weekend_handling),
            StoredRecurrencePattern::Weekly { day_of_week } => Ok(Self::weekly(day_of_week)),
        }
    }
}

impl RecurrencePattern {
    /// Monthly on `day_of_month` (1-31)
    pub fn monthly(day_of_month: u32, weekend_handling: WeekendHandling) -> LedgerResult<Self> {
        if !(1..=31).contains(&day_of_month) {
            return Err(LedgerError::day_out_of_range("day_of_month", day_of_month, 31));
        }
        Ok(Self::Monthly {
            day_of_month,
            weekend_handling,
        })
    }

    /// Weekly on an ISO weekday number: 1 = Monday .. 7 = Sunday
    pub fn weekly_iso(day_of_week: u32) -> LedgerResult<Self> {
        let day_of_week = match day_of_week {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            7 => Weekday::Sun,
            other => return Err(LedgerError::day_out_of_range("day_of_week", other, 7)),
        };
        Ok(Self::Weekly { day_of_week })
    }

    pub fn weekly(day_of_week: Weekday) -> Self {
        Self::Weekly { day_of_week }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Monthly {
                day_of_month,
                weekend_handling,
            } => match weekend_handling {
                WeekendHandling::AsIs => format!("Monthly on day {}", day_of_month),
                WeekendHandling::PreviousWeekday => {
                    format!("Monthly on day {} (previous weekday)", day_of_month)
                }
                WeekendHandling::NextWeekday => {
                    format!("Monthly on day {} (next weekday)", day_of_month)
                }
            },
            Self::Weekly { day_of_week } => format!("Weekly on {}", day_of_week),
        }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A recurring transaction definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: RecurringId,
    pub name: String,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub memo: String,
    pub pattern: RecurrencePattern,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_executed_date: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl RecurringTransaction {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
        pattern: RecurrencePattern,
    ) -> Self {
        Self {
            id: RecurringId::new(),
            name: name.into(),
            amount,
            kind,
            category_id: None,
            category_name: String::new(),
            memo: String::new(),
            pattern,
            is_active: true,
            last_executed_date: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId, name: impl Into<String>) -> Self {
        self.category_id = Some(category_id);
        self.category_name = name.into();
        self
    }

    /// Copy of this definition recorded as executed on `date`
    pub fn executed_on(&self, date: NaiveDate) -> Self {
        Self {
            last_executed_date: Some(date),
            ..self.clone()
        }
    }

    /// Copy of this definition with the active flag set
    pub fn with_active(&self, is_active: bool) -> Self {
        Self {
            is_active,
            ..self.clone()
        }
    }

    /// The concrete transaction to record when this definition runs on `date`
    pub fn materialize(&self, date: NaiveDate) -> Transaction {
        let mut txn = Transaction::new(date, self.amount, self.kind);
        txn.category_id = self.category_id;
        txn.category_name = self.category_name.clone();
        txn.memo = if self.memo.is_empty() {
            self.name.clone()
        } else {
            self.memo.clone()
        };
        txn
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if !self.amount.is_positive() {
            return Err(RecurringValidationError::NonPositiveAmount);
        }
        if let RecurrencePattern::Monthly { day_of_month, .. } = self.pattern {
            if !(1..=31).contains(&day_of_month) {
                return Err(RecurringValidationError::InvalidDayOfMonth(day_of_month));
            }
        }
        Ok(())
    }
}

impl fmt::Display for RecurringTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.amount, self.pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    NonPositiveAmount,
    InvalidDayOfMonth(u32),
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Recurring amount must be positive"),
            Self::InvalidDayOfMonth(day) => write!(f, "Invalid day of month: {}", day),
        }
    }
}

impl std::error::Error for RecurringValidationError {}
