//! Budget threshold detection
//!
//! Compares a period's spending in a budget's categories with its allocation
//! and reports the highest alert level crossed.

use std::collections::HashMap;
use tracing::debug;

use crate::models::{
    BudgetExceededResult, BudgetThreshold, CategoryBudget, CategoryId, Money, PayPeriod,
    Transaction,
};

/// Reports budgets that crossed a warning or overrun threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetThresholdDetector;

impl BudgetThresholdDetector {
    pub fn new() -> Self {
        Self
    }

    /// Spending counted against `budget` within `period`
    pub fn used_amount(
        &self,
        budget: &CategoryBudget,
        transactions: &[Transaction],
        period: &PayPeriod,
        category_ids_by_name: &HashMap<String, CategoryId>,
    ) -> Money {
        transactions
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.date))
            .filter(|t| {
                t.resolved_category_id(category_ids_by_name)
                    .is_some_and(|id| budget.covers(id))
            })
            .map(Transaction::display_amount)
            .sum()
    }

    /// Check one budget, returning the highest threshold it is strictly over
    pub fn check(
        &self,
        budget: &CategoryBudget,
        transactions: &[Transaction],
        period: &PayPeriod,
        category_ids_by_name: &HashMap<String, CategoryId>,
    ) -> Option<BudgetExceededResult> {
        let used_amount = self.used_amount(budget, transactions, period, category_ids_by_name);
        let budget_amount = budget.allocated_amount;

        let threshold = BudgetThreshold::DESCENDING
            .into_iter()
            .find(|t| t.is_crossed(used_amount, budget_amount))?;

        let usage_rate = used_amount.ratio_of(budget_amount);
        debug!(
            budget = %budget.id,
            used = %used_amount,
            allocated = %budget_amount,
            %threshold,
            "budget threshold crossed"
        );

        Some(BudgetExceededResult {
            category_budget: budget.clone(),
            used_amount,
            budget_amount,
            usage_rate,
            threshold,
        })
    }

    /// Check every budget touched by a newly recorded transaction and keep
    /// the most severe result. Income never triggers an alert.
    pub fn check_transaction(
        &self,
        trigger: &Transaction,
        budgets: &[CategoryBudget],
        transactions: &[Transaction],
        period: &PayPeriod,
        category_ids_by_name: &HashMap<String, CategoryId>,
    ) -> Option<BudgetExceededResult> {
        if !trigger.is_expense() {
            return None;
        }
        let category_id = trigger.resolved_category_id(category_ids_by_name)?;

        let results = budgets
            .iter()
            .filter(|b| b.covers(category_id))
            .filter_map(|b| self.check(b, transactions, period, category_ids_by_name));
        highest(results)
    }
}

/// Keep the result with the highest threshold; the first one wins ties
pub fn highest(
    results: impl IntoIterator<Item = BudgetExceededResult>,
) -> Option<BudgetExceededResult> {
    results.into_iter().fold(None, |best, result| match best {
        Some(current) if current.threshold >= result.threshold => Some(current),
        _ => Some(result),
    })
}
