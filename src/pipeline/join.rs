use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{ItemRecord, ListingRecord};

/// A listing paired with its catalog item. Borrows both from the stages that read them.
///
/// Serializes as `{"listing": {..}, "item": {..}}`; item columns such as `price`
/// share names with listing fields, so the two are never merged into one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JoinedRow<'a> {
    pub listing: &'a ListingRecord,
    pub item: &'a ItemRecord,
}

/// Hash inner join: builds a lookup over `right`, then looks up each `left` row in it.
///
/// Output follows `left` order. Left rows without a match are dropped. Keys on
/// the right are expected to be unique; the first occurrence wins otherwise.
pub fn inner_join<'a, L, R, K>(
    left: &'a [L],
    left_key: impl Fn(&L) -> K,
    right: &'a [R],
    right_key: impl Fn(&R) -> K,
) -> Vec<(&'a L, &'a R)>
where
    K: Eq + Hash,
{
    let mut lookup: HashMap<K, &'a R> = HashMap::with_capacity(right.len());
    for row in right {
        lookup.entry(right_key(row)).or_insert(row);
    }

    left.iter()
        .filter_map(|row| lookup.get(&left_key(row)).map(|matched| (row, *matched)))
        .collect()
}

pub fn join_listings<'a>(
    listings: &'a [ListingRecord],
    items: &'a [ItemRecord],
) -> Vec<JoinedRow<'a>> {
    inner_join(listings, |l| l.item_id, items, |i| i.id)
        .into_iter()
        .map(|(listing, item)| JoinedRow { listing, item })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    #[test]
    fn test_unmatched_listings_are_dropped() {
        let listings = vec![
            ListingRecord::new("Alice", ItemId(1), 100),
            ListingRecord::new("Bob", ItemId(2), 100),
        ];
        let items = vec![ItemRecord::new(ItemId(1), "Cloak")];

        let rows = join_listings(&listings, &items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].listing.seller, "Alice");
        assert_eq!(rows[0].item.name(), "Cloak");
    }

    #[test]
    fn test_join_keeps_listing_order_and_repeats_items() {
        let listings = vec![
            ListingRecord::new("Cara", ItemId(5), 300),
            ListingRecord::new("Alice", ItemId(4), 100),
            ListingRecord::new("Bob", ItemId(5), 200),
        ];
        let items = vec![
            ItemRecord::new(ItemId(4), "Belt"),
            ItemRecord::new(ItemId(5), "Ring"),
        ];

        let rows = join_listings(&listings, &items);
        let sellers: Vec<_> = rows.iter().map(|r| r.listing.seller.as_str()).collect();
        assert_eq!(sellers, vec!["Cara", "Alice", "Bob"]);
        assert!(rows.iter().all(|r| r.listing.item_id == r.item.id));
    }

    #[test]
    fn test_generic_join_on_tuples() {
        let left = [(1, 'a'), (2, 'b'), (3, 'c')];
        let right = [(3, "three"), (1, "one")];
        let joined = inner_join(&left, |l| l.0, &right, |r| r.0);
        assert_eq!(
            joined,
            vec![(&(1, 'a'), &(1, "one")), (&(3, 'c'), &(3, "three"))]
        );
    }

    #[test]
    fn test_listing_price_survives_item_price_column() {
        let listing = ListingRecord::new("Alice", ItemId(7), 1500);
        let item = ItemRecord::new(ItemId(7), "Cloak")
            .with("price", 3)
            .with("hp", 10);
        let row = JoinedRow {
            listing: &listing,
            item: &item,
        };
        let value = serde_json::to_value(row).unwrap();

        assert_eq!(value["listing"]["seller"], "Alice");
        assert_eq!(value["listing"]["price"], 1500);
        assert_eq!(value["item"]["price"], 3);
        assert_eq!(value["item"]["Name"], "Cloak");
        assert_eq!(value["item"]["hp"], 10);

        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text.matches("\"price\"").count(), 2);
        assert!(text.starts_with("{\"listing\":{"));
    }
}
