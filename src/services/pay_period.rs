//! Pay period calculation
//!
//! Turns a payday-of-month and an adjustment rule into concrete pay periods.
//! Every period is derived from the calendar rather than by adding a fixed
//! duration to the previous one, so stepping across short months and leap
//! years never accumulates drift.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::calendar::{clamped_day, resolve_business_day, shift_month, BusinessCalendar};
use crate::error::LedgerResult;
use crate::models::{check_date_format, PayPeriod, Payday, PaydayAdjustment};

/// Default strftime format for a period's display text
pub const DEFAULT_DATE_FORMAT: &str = "%Y.%m.%d";

/// Months searched on either side of a date when looking for paydays
const SEARCH_MONTHS: i32 = 12;

/// Calculates pay periods for one payday configuration
#[derive(Debug, Clone)]
pub struct PayPeriodCalculator<C> {
    payday: Payday,
    adjustment: PaydayAdjustment,
    calendar: C,
    date_format: String,
}

impl<C: BusinessCalendar> PayPeriodCalculator<C> {
    /// Create a new calculator
    pub fn new(payday: Payday, adjustment: PaydayAdjustment, calendar: C) -> Self {
        Self {
            payday,
            adjustment,
            calendar,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Use a different strftime format for display text
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> LedgerResult<Self> {
        let date_format = date_format.into();
        check_date_format(&date_format)?;
        self.date_format = date_format;
        Ok(self)
    }

    pub fn payday(&self) -> Payday {
        self.payday
    }

    pub fn adjustment(&self) -> PaydayAdjustment {
        self.adjustment
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// The payday in a month before any weekend adjustment, clamped to the
    /// month's last day (31 becomes Feb 28/29, Apr 30, ...)
    pub fn payday_in_month(&self, year: i32, month: u32) -> NaiveDate {
        clamped_day(year, month, self.payday.day())
    }

    /// The day salary actually arrives in a month
    pub fn adjusted_payday(&self, year: i32, month: u32) -> NaiveDate {
        resolve_business_day(
            self.payday_in_month(year, month),
            self.adjustment,
            &self.calendar,
        )
    }

    /// The pay period containing `reference`
    ///
    /// Starts on the latest adjusted payday on or before `reference` and ends
    /// the day before the following adjusted payday. Months adjacent to the
    /// reference are considered too, since a walked payday can cross into a
    /// neighbouring month.
    pub fn current_period(&self, reference: NaiveDate) -> PayPeriod {
        let start = self
            .paydays_around(reference)
            .filter(|payday| *payday <= reference)
            .max()
            .unwrap_or(reference);

        let next = self
            .paydays_around(start)
            .filter(|payday| *payday > start)
            .min();

        let end = next
            .and_then(|payday| payday.pred_opt())
            .unwrap_or(start);

        debug!(%reference, %start, %end, "resolved pay period");
        PayPeriod::new(start, end, &self.date_format)
    }

    /// The period immediately before `current`
    pub fn previous_period(&self, current: &PayPeriod) -> PayPeriod {
        match current.start_date.pred_opt() {
            Some(day_before) => self.current_period(day_before),
            None => current.clone(),
        }
    }

    /// The period immediately after `current`
    pub fn next_period(&self, current: &PayPeriod) -> PayPeriod {
        match current.end_date.succ_opt() {
            Some(day_after) => self.current_period(day_after),
            None => current.clone(),
        }
    }

    /// `today` if it falls inside `period`, otherwise the period's first day
    pub fn recommended_date(&self, period: &PayPeriod, today: NaiveDate) -> NaiveDate {
        if period.contains(today) {
            today
        } else {
            period.start_date
        }
    }

    /// Every period intersecting `[from, to]`, oldest first
    pub fn periods_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<PayPeriod> {
        let mut periods = Vec::new();
        if from > to {
            return periods;
        }

        let mut period = self.current_period(from);
        loop {
            let reached_end = period.end_date >= to;
            let next = self.next_period(&period);
            let stalled = next == period;
            periods.push(period);
            if reached_end || stalled {
                break;
            }
            period = next;
        }
        periods
    }

    /// Adjusted paydays for the months around `date`
    fn paydays_around(&self, date: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        let (year, month) = (date.year(), date.month());
        (-SEARCH_MONTHS..=SEARCH_MONTHS).map(move |delta| {
            let (y, m) = shift_month(year, month, delta);
            self.adjusted_payday(y, m)
        })
    }
}
