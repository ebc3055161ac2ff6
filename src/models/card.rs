//! Prepaid funding instruments
//!
//! A balance card is a debit-only pool that can never go below zero. A gift
//! card is bought once and redeemed once: whatever it is worth beyond the
//! purchase comes back as cash change.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CardId;
use super::money::Money;
use super::transaction::PaymentMethod;

/// A rechargeable prepaid balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCard {
    pub id: CardId,
    pub name: String,
    pub balance: Money,
}

impl BalanceCard {
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: CardId::new(),
            name: name.into(),
            balance,
        }
    }
}

/// A single-use voucher with a face value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: CardId,
    pub name: String,
    pub face_value: Money,
    pub remaining: Money,
    #[serde(default)]
    pub is_used: bool,
}

impl GiftCard {
    pub fn new(name: impl Into<String>, face_value: Money) -> Self {
        Self {
            id: CardId::new(),
            name: name.into(),
            face_value,
            remaining: face_value,
            is_used: false,
        }
    }
}

/// Any prepaid pool an expense can draw from before falling back to cash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FundedInstrument {
    Balance(BalanceCard),
    Gift(GiftCard),
}

impl FundedInstrument {
    pub fn id(&self) -> CardId {
        match self {
            Self::Balance(card) => card.id,
            Self::Gift(card) => card.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Balance(card) => &card.name,
            Self::Gift(card) => &card.name,
        }
    }

    /// Money still available on the instrument
    pub fn available(&self) -> Money {
        match self {
            Self::Balance(card) => card.balance,
            Self::Gift(card) => card.remaining,
        }
    }

    /// Payment tag for expenses funded by this instrument
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            Self::Balance(card) => PaymentMethod::BalanceCard { card_id: card.id },
            Self::Gift(card) => PaymentMethod::GiftCard { card_id: card.id },
        }
    }
}

impl fmt::Display for FundedInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.available())
    }
}

impl From<BalanceCard> for FundedInstrument {
    fn from(card: BalanceCard) -> Self {
        Self::Balance(card)
    }
}

impl From<GiftCard> for FundedInstrument {
    fn from(card: GiftCard) -> Self {
        Self::Gift(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gift_card_is_full() {
        let card = GiftCard::new("Book voucher", Money::new(10_000));
        assert_eq!(card.remaining, card.face_value);
        assert!(!card.is_used);
    }

    #[test]
    fn test_instrument_accessors() {
        let card = BalanceCard::new("Transit", Money::new(3_000));
        let id = card.id;
        let instrument = FundedInstrument::from(card);

        assert_eq!(instrument.id(), id);
        assert_eq!(instrument.name(), "Transit");
        assert_eq!(instrument.available(), Money::new(3_000));
        assert_eq!(
            instrument.payment_method(),
            PaymentMethod::BalanceCard { card_id: id }
        );
    }

    #[test]
    fn test_serialization() {
        let instrument = FundedInstrument::Gift(GiftCard::new("Voucher", Money::new(8_000)));
        let json = serde_json::to_string(&instrument).unwrap();
        assert!(json.contains("\"type\":\"gift\""));
        let deserialized: FundedInstrument = serde_json::from_str(&json).unwrap();
        assert_eq!(instrument, deserialized);
    }
}
