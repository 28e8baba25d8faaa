use serde::Serialize;
use std::fmt;

use super::item::ItemId;
use crate::errors::{BazaarError, Result};
use crate::query::{Condition, FieldSource, Operand, Predicate};

/// Copper pieces per user-facing price tier (one platinum).
pub const PRICE_TIER_SCALE: i64 = 1000;

/// An amount in the raw stored currency unit (copper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub fn from_tier(tier: i64) -> Self {
        Price(tier.saturating_mul(PRICE_TIER_SCALE))
    }

    pub fn copper(self) -> i64 {
        self.0
    }

    /// Splits the amount into (platinum, gold, silver, copper).
    pub fn coins(self) -> (i64, i64, i64, i64) {
        let copper = self.0.max(0);
        (
            copper / 1000,
            copper % 1000 / 100,
            copper % 100 / 10,
            copper % 10,
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (plat, gold, silver, copper) = self.coins();
        let parts: Vec<String> = [
            (plat, "p"),
            (gold, "g"),
            (silver, "s"),
            (copper, "c"),
        ]
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{}{}", group_thousands(*amount), unit))
        .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// One seller's offer of one item, as read from the trader store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub seller: String,
    pub item_id: ItemId,
    pub price: Price,
}

impl ListingRecord {
    pub fn new(seller: impl Into<String>, item_id: ItemId, price: i64) -> Self {
        Self {
            seller: seller.into(),
            item_id,
            price: Price(price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Seller,
    Price,
}

impl FieldSource<ListingField> for ListingRecord {
    fn field_value(&self, field: ListingField) -> Operand {
        match field {
            ListingField::Seller => Operand::Text(self.seller.clone()),
            ListingField::Price => Operand::Int(self.price.0),
        }
    }
}

/// Seller-side constraints. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub seller: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        let seller = seller.into();
        self.seller = if seller.is_empty() { None } else { Some(seller) };
        self
    }

    /// Sets the price bounds from user-facing tiers, scaled to copper.
    /// A tier of 0 leaves that side unbounded, like an empty form field.
    pub fn with_price_tiers(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        let bound = |tier: Option<i64>| tier.filter(|t| *t != 0).map(Price::from_tier);
        self.min_price = bound(min);
        self.max_price = bound(max);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(seller) = &self.seller {
            if !seller.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(BazaarError::validation(format!(
                    "seller name '{}' may only contain letters",
                    seller
                )));
            }
        }
        for price in [self.min_price, self.max_price].into_iter().flatten() {
            if price.0 < 0 {
                return Err(BazaarError::validation("prices must not be negative"));
            }
        }
        Ok(())
    }

    pub fn condition(&self) -> Condition<ListingField> {
        Condition::all()
            .and_some(self.seller.clone(), |name| Predicate::Equals {
                field: ListingField::Seller,
                value: Operand::Text(name),
            })
            .and_some(self.min_price, |p| Predicate::AtLeast {
                field: ListingField::Price,
                value: p.0,
            })
            .and_some(self.max_price, |p| Predicate::AtMost {
                field: ListingField::Price,
                value: p.0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_omits_empty_coins() {
        assert_eq!(Price(1_234_506).to_string(), "1,234p 5g 6c");
        assert_eq!(Price(1500).to_string(), "1p 5g");
        assert_eq!(Price(7).to_string(), "7c");
        assert_eq!(Price(0).to_string(), "");
    }

    #[test]
    fn test_price_tiers_are_scaled() {
        let filter = ListingFilter::new().with_price_tiers(Some(1), Some(2));
        assert_eq!(filter.min_price, Some(Price(1000)));
        assert_eq!(filter.max_price, Some(Price(2000)));
        assert_eq!(filter.condition().predicates().len(), 2);
    }

    #[test]
    fn test_zero_tier_is_no_bound() {
        let filter = ListingFilter::new().with_price_tiers(Some(0), Some(0));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
        assert!(filter.condition().is_unconstrained());

        let upper_only = ListingFilter::new().with_price_tiers(Some(0), Some(3));
        assert_eq!(upper_only.min_price, None);
        assert_eq!(upper_only.max_price, Some(Price(3000)));
    }

    #[test]
    fn test_seller_must_be_alphabetic() {
        assert!(ListingFilter::new().with_seller("Bob").validate().is_ok());
        assert!(ListingFilter::new().with_seller("Bob'; --").validate().is_err());
        assert_eq!(ListingFilter::new().with_seller("").seller, None);
    }
}
