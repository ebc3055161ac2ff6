//! Recurring transaction scheduling
//!
//! Decides which recurring definitions are due on a given day. The scheduler
//! only reads definitions; recording an execution is the caller's job (see
//! [`RecurringTransaction::executed_on`]).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::{
    last_day_of_month, resolve_business_day, shift_month, BusinessCalendar, WeekendCalendar,
};
use crate::models::{RecurrencePattern, RecurringTransaction, WeekendHandling};

/// Furthest ahead `next_due_date` looks
const LOOKAHEAD_DAYS: i64 = 366;

/// What a monthly rule does in a month that lacks its day (e.g. 31 in April)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShortMonthPolicy {
    /// The rule does not fire that month
    #[default]
    Skip,
    /// The rule fires on the month's last day
    LastDay,
}

/// Decides when recurring definitions fall due
#[derive(Debug, Clone, Default)]
pub struct RecurringScheduler<C = WeekendCalendar> {
    calendar: C,
    short_month_policy: ShortMonthPolicy,
}

impl<C: BusinessCalendar> RecurringScheduler<C> {
    pub fn new(calendar: C, short_month_policy: ShortMonthPolicy) -> Self {
        Self {
            calendar,
            short_month_policy,
        }
    }

    pub fn short_month_policy(&self) -> ShortMonthPolicy {
        self.short_month_policy
    }

    /// Whether the definition's pattern falls on `date`
    ///
    /// Monthly rules match the (possibly weekend-adjusted) due day of
    /// `date`'s month, or of a neighbouring month whose adjusted due day
    /// spilled over into it. Weekly rules match the weekday only.
    pub fn is_due_on(&self, definition: &RecurringTransaction, date: NaiveDate) -> bool {
        match definition.pattern {
            RecurrencePattern::Monthly {
                day_of_month,
                weekend_handling,
            } => [-1, 0, 1].iter().any(|delta| {
                let (year, month) = shift_month(date.year(), date.month(), *delta);
                self.monthly_due_date(year, month, day_of_month, weekend_handling) == Some(date)
            }),
            RecurrencePattern::Weekly { day_of_week } => date.weekday() == day_of_week,
        }
    }

    /// Whether the definition already ran on `date`
    pub fn is_executed_on(&self, definition: &RecurringTransaction, date: NaiveDate) -> bool {
        definition.last_executed_date == Some(date)
    }

    /// Active definitions due `today` that have not run yet, in input order
    pub fn due_today<'a>(
        &self,
        definitions: &'a [RecurringTransaction],
        today: NaiveDate,
    ) -> Vec<&'a RecurringTransaction> {
        let due: Vec<&RecurringTransaction> = definitions
            .iter()
            .filter(|d| d.is_active)
            .filter(|d| self.is_due_on(d, today))
            .filter(|d| !self.is_executed_on(d, today))
            .collect();

        debug!(%today, total = definitions.len(), due = due.len(), "checked recurring definitions");
        due
    }

    /// First day strictly after `after` on which an active definition is due
    pub fn next_due_date(
        &self,
        definition: &RecurringTransaction,
        after: NaiveDate,
    ) -> Option<NaiveDate> {
        if !definition.is_active {
            return None;
        }
        (1..=LOOKAHEAD_DAYS)
            .filter_map(|offset| after.checked_add_signed(Duration::days(offset)))
            .find(|date| self.is_due_on(definition, *date))
    }

    /// The due day of a monthly rule in one month, `None` when the month is
    /// skipped under [`ShortMonthPolicy::Skip`]
    pub fn monthly_due_date(
        &self,
        year: i32,
        month: u32,
        day_of_month: u32,
        weekend_handling: WeekendHandling,
    ) -> Option<NaiveDate> {
        if !(1..=31).contains(&day_of_month) {
            return None;
        }
        let raw = match NaiveDate::from_ymd_opt(year, month, day_of_month) {
            Some(date) => date,
            None => match self.short_month_policy {
                ShortMonthPolicy::Skip => return None,
                ShortMonthPolicy::LastDay => last_day_of_month(year, month),
            },
        };

        Some(match weekend_handling.adjustment() {
            Some(adjustment) => resolve_business_day(raw, adjustment, &self.calendar),
            None => raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentMethod, TransactionKind};
    use crate::services::calendar::HolidayCalendar;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn definition(pattern: RecurrencePattern) -> RecurringTransaction {
        RecurringTransaction::new(
            "Subscription",
            Money::new(9_900),
            TransactionKind::Expense {
                payment: PaymentMethod::Cash,
            },
            pattern,
        )
    }

    fn monthly(day: u32, handling: WeekendHandling) -> RecurringTransaction {
        definition(RecurrencePattern::monthly(day, handling).unwrap())
    }

    fn scheduler() -> RecurringScheduler {
        RecurringScheduler::default()
    }

    #[test]
    fn test_monthly_as_is() {
        let rule = monthly(15, WeekendHandling::AsIs);
        // 2025-03-15 is a Saturday; as-is still fires on it
        assert!(scheduler().is_due_on(&rule, date(2025, 3, 15)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 3, 14)));
    }

    #[test]
    fn test_monthly_previous_weekday() {
        let rule = monthly(15, WeekendHandling::PreviousWeekday);
        assert!(scheduler().is_due_on(&rule, date(2025, 3, 14)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 3, 15)));
    }

    #[test]
    fn test_monthly_next_weekday() {
        let rule = monthly(15, WeekendHandling::NextWeekday);
        assert!(scheduler().is_due_on(&rule, date(2025, 3, 17)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 3, 15)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 3, 16)));
    }

    #[test]
    fn test_monthly_next_weekday_spills_into_next_month() {
        // 2025-05-31 is a Saturday, so the May occurrence lands on Monday 2 June
        let rule = monthly(31, WeekendHandling::NextWeekday);
        assert!(scheduler().is_due_on(&rule, date(2025, 6, 2)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 5, 31)));
    }

    #[test]
    fn test_day_31_in_april_is_skipped_by_default() {
        let rule = monthly(31, WeekendHandling::AsIs);
        assert!(!scheduler().is_due_on(&rule, date(2025, 4, 30)));
        assert!(scheduler().is_due_on(&rule, date(2025, 5, 31)));
    }

    #[test]
    fn test_day_31_in_april_with_last_day_policy() {
        let rule = monthly(31, WeekendHandling::AsIs);
        let scheduler = RecurringScheduler::new(WeekendCalendar, ShortMonthPolicy::LastDay);
        assert!(scheduler.is_due_on(&rule, date(2025, 4, 30)));
        assert!(scheduler.is_due_on(&rule, date(2025, 2, 28)));
        assert!(!scheduler.is_due_on(&rule, date(2025, 2, 27)));
    }

    #[test]
    fn test_holiday_is_walked_over() {
        let scheduler = RecurringScheduler::new(
            HolidayCalendar::new([date(2025, 10, 6)]),
            ShortMonthPolicy::Skip,
        );
        // 2025-10-05 is a Sunday and the 6th a holiday
        let rule = monthly(5, WeekendHandling::NextWeekday);
        assert!(scheduler.is_due_on(&rule, date(2025, 10, 7)));
        assert!(!scheduler.is_due_on(&rule, date(2025, 10, 6)));
    }

    #[test]
    fn test_weekly_matches_weekday_only() {
        let rule = definition(RecurrencePattern::weekly_iso(6).unwrap());
        // Saturdays, never adjusted
        assert!(scheduler().is_due_on(&rule, date(2025, 3, 15)));
        assert!(scheduler().is_due_on(&rule, date(2025, 3, 22)));
        assert!(!scheduler().is_due_on(&rule, date(2025, 3, 14)));
    }

    #[test]
    fn test_is_executed_on() {
        let rule = monthly(10, WeekendHandling::AsIs).executed_on(date(2025, 3, 10));
        assert!(scheduler().is_executed_on(&rule, date(2025, 3, 10)));
        assert!(!scheduler().is_executed_on(&rule, date(2025, 4, 10)));
    }

    #[test]
    fn test_due_today_filters_and_keeps_order() {
        let today = date(2025, 3, 10); // Monday
        let weekly = definition(RecurrencePattern::weekly(Weekday::Mon));
        let monthly_due = monthly(10, WeekendHandling::AsIs);
        let executed = monthly(10, WeekendHandling::AsIs).executed_on(today);
        let inactive = monthly(10, WeekendHandling::AsIs).with_active(false);
        let not_due = monthly(11, WeekendHandling::AsIs);
        let executed_last_month = monthly(10, WeekendHandling::AsIs).executed_on(date(2025, 2, 10));

        let definitions = vec![
            weekly.clone(),
            executed,
            monthly_due.clone(),
            inactive,
            not_due,
            executed_last_month.clone(),
        ];
        let due = scheduler().due_today(&definitions, today);

        let ids: Vec<_> = due.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![weekly.id, monthly_due.id, executed_last_month.id]);
    }

    #[test]
    fn test_due_today_is_repeatable() {
        let definitions = vec![monthly(10, WeekendHandling::AsIs)];
        let today = date(2025, 3, 10);
        let first: Vec<_> = scheduler().due_today(&definitions, today).iter().map(|d| d.id).collect();
        let second: Vec<_> = scheduler().due_today(&definitions, today).iter().map(|d| d.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_day_never_falls_due() {
        let scheduler = RecurringScheduler::new(WeekendCalendar, ShortMonthPolicy::LastDay);
        assert_eq!(
            scheduler.monthly_due_date(2025, 4, 0, WeekendHandling::AsIs),
            None
        );
        assert_eq!(
            scheduler.monthly_due_date(2025, 4, 99, WeekendHandling::NextWeekday),
            None
        );

        let mut rule = monthly(30, WeekendHandling::AsIs);
        rule.pattern = RecurrencePattern::Monthly {
            day_of_month: 0,
            weekend_handling: WeekendHandling::AsIs,
        };
        assert!(!scheduler.is_due_on(&rule, date(2025, 4, 30)));
        assert_eq!(scheduler.next_due_date(&rule, date(2025, 4, 1)), None);
    }

    #[test]
    fn test_next_due_date() {
        let rule = monthly(31, WeekendHandling::AsIs);
        assert_eq!(
            scheduler().next_due_date(&rule, date(2025, 3, 31)),
            Some(date(2025, 5, 31))
        );

        let inactive = rule.with_active(false);
        assert_eq!(scheduler().next_due_date(&inactive, date(2025, 3, 31)), None);

        let weekly = definition(RecurrencePattern::weekly(Weekday::Fri));
        assert_eq!(
            scheduler().next_due_date(&weekly, date(2025, 3, 14)),
            Some(date(2025, 3, 21))
        );
    }
}
