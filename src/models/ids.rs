//! Identifiers for ledger entities
//!
//! Each entity gets its own id type so a card id cannot be passed where a
//! category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a uuid-backed id whose display form is a short prefixed tag
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        /// Prefix plus the first eight hex digits, e.g. `card-550e8400`
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let simple = self.0.simple().to_string();
                write!(f, "{}{}", $display_prefix, &simple[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(CardId, "card-");
define_id!(RecurringId, "rec-");
define_id!(BudgetId, "bud-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = CardId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("card-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_ids_from_known_uuid() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let category = CategoryId::from(uuid);
        assert_eq!(category.to_string(), "cat-550e8400");
        assert_eq!(category, CategoryId::from(uuid));
        assert_ne!(CategoryId::new(), CategoryId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = RecurringId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RecurringId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
