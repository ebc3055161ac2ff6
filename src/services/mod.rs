//! Computation layer for the ledger engine
//!
//! Each service is a pure function of its inputs: callers load entities,
//! pass them in, and persist whatever comes back.

pub mod budget_alert;
pub mod calendar;
pub mod pay_period;
pub mod recurring;
pub mod waterfall;

pub use budget_alert::{highest, BudgetThresholdDetector};
pub use calendar::{resolve_business_day, BusinessCalendar, HolidayCalendar, WeekendCalendar};
pub use pay_period::PayPeriodCalculator;
pub use recurring::{RecurringScheduler, ShortMonthPolicy};
pub use waterfall::{Allocation, BaseTransactionFields, ExpenseIntent, FundWaterfallAllocator};
