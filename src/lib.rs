//! ledger-core - financial-period engine for a personal ledger
//!
//! This library holds the parts of a personal ledger with real algorithmic
//! content. It takes already-loaded data and returns computed values; it
//! never touches storage, the network or the system clock.
//!
//! # Architecture
//!
//! - `models`: value types (money, ids, pay periods, transactions, cards,
//!   recurring definitions, budgets)
//! - `services`: the four computations
//!   - `pay_period`: pay period boundaries from a payday and adjustment rule
//!   - `recurring`: which recurring definitions are due today
//!   - `waterfall`: splitting an expense across a prepaid card and cash
//!   - `budget_alert`: warning/overrun detection for category budgets
//! - `config`: user settings and service construction
//! - `error`: custom error types
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ledger_core::config::Settings;
//! use ledger_core::services::WeekendCalendar;
//!
//! let settings = Settings::default();
//! let calculator = settings.pay_period_calculator(WeekendCalendar)?;
//! let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! let period = calculator.current_period(today);
//! assert!(period.contains(today));
//! # Ok::<(), ledger_core::LedgerError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{LedgerError, LedgerResult};
