//! Business-day lookup and the weekend/holiday walk
//!
//! Holidays come from the caller (usually a fetched public-holiday list);
//! nothing here knows about any particular country.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use tracing::warn;

use crate::models::PaydayAdjustment;

/// Longest walk attempted before giving up on finding a business day
const MAX_WALK_DAYS: u32 = 366;

/// Answers whether money moves on a given date
pub trait BusinessCalendar {
    fn is_business_day(&self, date: NaiveDate) -> bool;
}

impl<F> BusinessCalendar for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_business_day(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every weekday is a business day
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl BusinessCalendar for WeekendCalendar {
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date)
    }
}

/// Weekdays that are not listed holidays
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl BusinessCalendar for HolidayCalendar {
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Walk from `date` one day at a time in the adjustment's direction until a
/// business day is found. A business day is returned unchanged.
pub fn resolve_business_day<C>(
    date: NaiveDate,
    adjustment: PaydayAdjustment,
    calendar: &C,
) -> NaiveDate
where
    C: BusinessCalendar + ?Sized,
{
    let mut candidate = date;
    for _ in 0..MAX_WALK_DAYS {
        if calendar.is_business_day(candidate) {
            return candidate;
        }
        candidate += adjustment.step();
    }

    warn!(
        %date,
        ?adjustment,
        "no business day within {} days, keeping original date", MAX_WALK_DAYS
    );
    date
}

/// Last calendar day of a month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// `day` in the given month, clamped to the month's last day
pub fn clamped_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = last_day_of_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.min(last.day())).unwrap_or(last)
}

/// Shift a (year, month) pair by a signed number of months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
