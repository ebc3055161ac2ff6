//! Category budget model
//!
//! A budget assigns an amount to a group of categories for one pay period.
//! Threshold results are reports computed on demand, never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// An allocation covering one or more categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub id: BudgetId,
    #[serde(default)]
    pub name: String,
    pub allocated_amount: Money,
    pub category_ids: Vec<CategoryId>,
}

impl CategoryBudget {
    pub fn new(
        name: impl Into<String>,
        allocated_amount: Money,
        category_ids: Vec<CategoryId>,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            allocated_amount,
            category_ids,
        }
    }

    pub fn covers(&self, category_id: CategoryId) -> bool {
        self.category_ids.contains(&category_id)
    }

    /// A zero or negative allocation means no budget was set
    pub fn is_set(&self) -> bool {
        self.allocated_amount.is_positive()
    }
}

impl fmt::Display for CategoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budgeted: {}", self.name, self.allocated_amount)
    }
}

/// Usage levels that trigger an alert, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetThreshold {
    Warning,
    Exceeded,
}

impl BudgetThreshold {
    /// Checked in this order; the first one crossed is reported
    pub const DESCENDING: [BudgetThreshold; 2] = [Self::Exceeded, Self::Warning];

    pub const fn percent(&self) -> i64 {
        match self {
            Self::Exceeded => 100,
            Self::Warning => 70,
        }
    }

    /// Strictly-greater test done in integers: `used / allocated > percent / 100`
    pub fn is_crossed(&self, used: Money, allocated: Money) -> bool {
        if !allocated.is_positive() {
            return false;
        }
        i128::from(used.amount()) * 100 > i128::from(allocated.amount()) * i128::from(self.percent())
    }
}

impl fmt::Display for BudgetThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// A budget found over one of its thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetExceededResult {
    pub category_budget: CategoryBudget,
    pub used_amount: Money,
    pub budget_amount: Money,
    pub usage_rate: f64,
    pub threshold: BudgetThreshold,
}

impl fmt::Display for BudgetExceededResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} used ({:.1}%), over {}",
            self.category_budget.name,
            self.used_amount,
            self.budget_amount,
            self.usage_rate * 100.0,
            self.threshold
        )
    }
}
