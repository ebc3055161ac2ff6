//! Core data models for the ledger engine
//!
//! Plain values passed in by callers (transactions, cards, budgets, recurring
//! definitions) and the values computed from them (pay periods, threshold
//! reports).

pub mod budget;
pub mod card;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::{BudgetExceededResult, BudgetThreshold, CategoryBudget};
pub use card::{BalanceCard, FundedInstrument, GiftCard};
pub use category::{category_ids_by_name, Category};
pub use ids::{BudgetId, CardId, CategoryId, RecurringId, TransactionId};
pub use money::Money;
pub use period::{check_date_format, PayPeriod, Payday, PaydayAdjustment};
pub use recurring::{RecurrencePattern, RecurringTransaction, WeekendHandling};
pub use transaction::{IncomeType, PaymentMethod, Transaction, TransactionKind};
