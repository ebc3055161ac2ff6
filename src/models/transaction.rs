//! Transaction model
//!
//! Amounts are always positive; whether money left or entered the ledger is
//! carried by [`TransactionKind`], together with how an expense was paid or
//! where an income came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::{CardId, CategoryId, TransactionId};
use super::money::Money;

/// How an expense was funded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BalanceCard { card_id: CardId },
    GiftCard { card_id: CardId },
}

impl PaymentMethod {
    /// The prepaid instrument backing this payment, if any
    pub fn card_id(&self) -> Option<CardId> {
        match self {
            Self::Cash => None,
            Self::BalanceCard { card_id } | Self::GiftCard { card_id } => Some(*card_id),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::BalanceCard { card_id } => write!(f, "Balance card {}", card_id),
            Self::GiftCard { card_id } => write!(f, "Gift card {}", card_id),
        }
    }
}

/// Where an income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IncomeType {
    Salary,
    Refund,
    /// Change handed back in cash when a gift card is worth more than the purchase
    GiftCardChange { card_id: CardId },
    Other,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    Expense { payment: PaymentMethod },
    Income { source: IncomeType },
}

/// A single dated money movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the repository on insert; `None` for derived records
    #[serde(default)]
    pub id: Option<TransactionId>,

    pub date: NaiveDate,

    /// Always non-negative
    pub amount: Money,

    pub kind: TransactionKind,

    pub category_id: Option<CategoryId>,

    /// Category name, kept for records created before ids existed
    #[serde(default)]
    pub category_name: String,

    #[serde(default)]
    pub memo: String,

    /// Portion reimbursed by others (e.g. a shared bill settled later)
    #[serde(default)]
    pub settlement_amount: Money,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Money, kind: TransactionKind) -> Self {
        Self {
            id: None,
            date,
            amount,
            kind,
            category_id: None,
            category_name: String::new(),
            memo: String::new(),
            settlement_amount: Money::zero(),
        }
    }

    /// Create an expense paid with the given method
    pub fn expense(date: NaiveDate, amount: Money, payment: PaymentMethod) -> Self {
        Self::new(date, amount, TransactionKind::Expense { payment })
    }

    /// Create an income from the given source
    pub fn income(date: NaiveDate, amount: Money, source: IncomeType) -> Self {
        Self::new(date, amount, TransactionKind::Income { source })
    }

    pub fn with_category(mut self, category_id: CategoryId, name: impl Into<String>) -> Self {
        self.category_id = Some(category_id);
        self.category_name = name.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_settlement(mut self, settlement_amount: Money) -> Self {
        self.settlement_amount = settlement_amount;
        self
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    /// The payment method of an expense
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self.kind {
            TransactionKind::Expense { payment } => Some(payment),
            TransactionKind::Income { .. } => None,
        }
    }

    /// Amount the user actually bore: the amount minus any settled portion
    pub fn display_amount(&self) -> Money {
        self.amount.saturating_sub_floor(self.settlement_amount)
    }

    /// Resolve the category id, falling back to a lookup by name
    pub fn resolved_category_id(
        &self,
        category_ids_by_name: &HashMap<String, CategoryId>,
    ) -> Option<CategoryId> {
        self.category_id
            .or_else(|| category_ids_by_name.get(&self.category_name).copied())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.category_name,
            sign,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_display_amount_excludes_settlement() {
        let txn = Transaction::expense(date(), Money::new(30_000), PaymentMethod::Cash)
            .with_settlement(Money::new(20_000));
        assert_eq!(txn.display_amount(), Money::new(10_000));

        let over = Transaction::expense(date(), Money::new(1_000), PaymentMethod::Cash)
            .with_settlement(Money::new(5_000));
        assert_eq!(over.display_amount(), Money::zero());
    }

    #[test]
    fn test_display_amount_at_extremes() {
        let txn = Transaction::expense(date(), Money::new(i64::MAX), PaymentMethod::Cash)
            .with_settlement(Money::new(-1));
        assert_eq!(txn.display_amount(), Money::new(i64::MAX));
    }

    #[test]
    fn test_resolved_category_prefers_id() {
        let food = CategoryId::new();
        let other = CategoryId::new();
        let mut lookup = HashMap::new();
        lookup.insert("Food".to_string(), other);

        let with_id = Transaction::expense(date(), Money::new(100), PaymentMethod::Cash)
            .with_category(food, "Food");
        assert_eq!(with_id.resolved_category_id(&lookup), Some(food));

        let mut by_name = Transaction::expense(date(), Money::new(100), PaymentMethod::Cash);
        by_name.category_name = "Food".into();
        assert_eq!(by_name.resolved_category_id(&lookup), Some(other));

        let unknown = Transaction::expense(date(), Money::new(100), PaymentMethod::Cash);
        assert_eq!(unknown.resolved_category_id(&lookup), None);
    }

    #[test]
    fn test_kind_checks() {
        let card = CardId::new();
        let expense = Transaction::expense(
            date(),
            Money::new(100),
            PaymentMethod::GiftCard { card_id: card },
        );
        assert!(expense.is_expense());
        assert_eq!(expense.payment_method().and_then(|p| p.card_id()), Some(card));

        let income = Transaction::income(date(), Money::new(100), IncomeType::Salary);
        assert!(income.is_income());
        assert_eq!(income.payment_method(), None);
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::expense(
            date(),
            Money::new(5_000),
            PaymentMethod::BalanceCard {
                card_id: CardId::new(),
            },
        )
        .with_memo("Lunch");

        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }
}
