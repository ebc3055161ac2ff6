//! Fund waterfall allocation
//!
//! Splits one expense across a prepaid instrument and cash. The instrument is
//! drawn first; whatever it cannot cover is paid in cash. A gift card is
//! always used up in one go, with any value beyond the purchase returned as
//! cash change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{
    BalanceCard, CategoryId, FundedInstrument, GiftCard, IncomeType, Money, PaymentMethod,
    Transaction, TransactionKind,
};

/// Fields shared by every record generated from one expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTransactionFields {
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub memo: String,
}

impl BaseTransactionFields {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            category_id: None,
            category_name: String::new(),
            memo: String::new(),
        }
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

    fn build(&self, amount: Money, kind: TransactionKind) -> Transaction {
        let mut txn = Transaction::new(self.date, amount, kind);
        txn.category_id = self.category_id;
        txn.category_name = self.category_name.clone();
        txn.memo = self.memo.clone();
        txn
    }
}

/// The user's single logical expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseIntent {
    pub amount: Money,
    pub base: BaseTransactionFields,
}

impl ExpenseIntent {
    pub fn new(amount: Money, base: BaseTransactionFields) -> Self {
        Self { amount, base }
    }
}

/// The records to insert and the instrument state to write back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub transactions: Vec<Transaction>,
    pub instrument: FundedInstrument,
}

impl Allocation {
    /// Sum of generated expenses; always equals the intent's amount
    pub fn expense_total(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    /// Cash change handed back for an over-valued gift card
    pub fn refund_total(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum()
    }

    /// Expenses charged to the instrument itself
    pub fn card_funded_total(&self) -> Money {
        let card_id = self.instrument.id();
        self.transactions
            .iter()
            .filter(|t| t.payment_method().and_then(|p| p.card_id()) == Some(card_id))
            .map(|t| t.amount)
            .sum()
    }

    /// Expenses paid in cash
    pub fn cash_funded_total(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.payment_method() == Some(PaymentMethod::Cash))
            .map(|t| t.amount)
            .sum()
    }

    /// How much the instrument gave up: card-funded expenses plus change
    pub fn card_drawdown(&self) -> Money {
        self.card_funded_total() + self.refund_total()
    }
}

/// Splits expenses across a prepaid instrument and cash
#[derive(Debug, Clone, Copy, Default)]
pub struct FundWaterfallAllocator;

impl FundWaterfallAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocate `intent` against `instrument`
    ///
    /// Returns `None` for a non-positive amount, which callers are expected
    /// to filter out beforehand.
    pub fn allocate(
        &self,
        instrument: &FundedInstrument,
        intent: &ExpenseIntent,
    ) -> Option<Allocation> {
        if !intent.amount.is_positive() {
            warn!(amount = %intent.amount, card = %instrument.id(), "refusing non-positive allocation");
            return None;
        }

        let allocation = match instrument {
            FundedInstrument::Balance(card) => self.allocate_balance(card, intent),
            FundedInstrument::Gift(card) => self.allocate_gift(card, intent),
        };

        debug!(
            card = %allocation.instrument.id(),
            amount = %intent.amount,
            card_funded = %allocation.card_funded_total(),
            cash_funded = %allocation.cash_funded_total(),
            refund = %allocation.refund_total(),
            "allocated expense"
        );
        Some(allocation)
    }

    fn allocate_balance(&self, card: &BalanceCard, intent: &ExpenseIntent) -> Allocation {
        let payment = PaymentMethod::BalanceCard { card_id: card.id };
        let amount = intent.amount;
        let available = card.balance.max(Money::zero());

        let mut transactions = Vec::with_capacity(2);
        let card_portion = available.min(amount);

        if card_portion.is_positive() {
            transactions.push(intent.base.build(card_portion, TransactionKind::Expense { payment }));
        }
        if card_portion < amount {
            transactions.push(intent.base.build(
                amount - card_portion,
                TransactionKind::Expense {
                    payment: PaymentMethod::Cash,
                },
            ));
        }

        let updated = BalanceCard {
            balance: available - card_portion,
            ..card.clone()
        };

        Allocation {
            transactions,
            instrument: FundedInstrument::Balance(updated),
        }
    }

    fn allocate_gift(&self, card: &GiftCard, intent: &ExpenseIntent) -> Allocation {
        let payment = PaymentMethod::GiftCard { card_id: card.id };
        let amount = intent.amount;
        let remaining = card.remaining.max(Money::zero());

        let mut transactions = Vec::with_capacity(2);
        if remaining >= amount {
            transactions.push(intent.base.build(amount, TransactionKind::Expense { payment }));
            if remaining > amount {
                transactions.push(intent.base.build(
                    remaining - amount,
                    TransactionKind::Income {
                        source: IncomeType::GiftCardChange { card_id: card.id },
                    },
                ));
            }
        } else {
            if remaining.is_positive() {
                transactions.push(intent.base.build(remaining, TransactionKind::Expense { payment }));
            }
            transactions.push(intent.base.build(
                amount - remaining,
                TransactionKind::Expense {
                    payment: PaymentMethod::Cash,
                },
            ));
        }

        let updated = GiftCard {
            remaining: Money::zero(),
            is_used: true,
            ..card.clone()
        };

        Allocation {
            transactions,
            instrument: FundedInstrument::Gift(updated),
        }
    }
}
