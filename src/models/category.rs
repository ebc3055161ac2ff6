//! Category model
//!
//! Transactions may reference their category by id or, for older records,
//! only by name; `category_ids_by_name` builds the lookup used to resolve
//! the latter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::CategoryId;

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Build a name -> id lookup. Later duplicates win.
pub fn category_ids_by_name(categories: &[Category]) -> HashMap<String, CategoryId> {
    categories
        .iter()
        .map(|c| (c.name.clone(), c.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let food = Category::new("Food");
        let rent = Category::new("Rent");
        let lookup = category_ids_by_name(&[food.clone(), rent.clone()]);

        assert_eq!(lookup.get("Food"), Some(&food.id));
        assert_eq!(lookup.get("Rent"), Some(&rent.id));
        assert_eq!(lookup.get("Travel"), None);
    }
}
