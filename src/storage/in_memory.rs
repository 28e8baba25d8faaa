//! In-process stores that evaluate conditions directly. Useful for tests and embedding.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ItemCatalog, ListingStore};
use crate::errors::StoreResult;
use crate::models::{ItemField, ItemRecord, ListingField, ListingRecord};
use crate::query::Condition;

#[derive(Default)]
pub struct InMemoryListingStore {
    listings: Vec<ListingRecord>,
    calls: AtomicUsize,
}

impl InMemoryListingStore {
    pub fn new(listings: Vec<ListingRecord>) -> Self {
        Self {
            listings,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn fetch_listings(
        &self,
        condition: &Condition<ListingField>,
    ) -> StoreResult<Vec<ListingRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .listings
            .iter()
            .filter(|listing| condition.matches(*listing))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryItemCatalog {
    items: Vec<ItemRecord>,
    calls: AtomicUsize,
}

impl InMemoryItemCatalog {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            items,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemCatalog for InMemoryItemCatalog {
    async fn fetch_items(&self, condition: &Condition<ItemField>) -> StoreResult<Vec<ItemRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .iter()
            .filter(|item| condition.matches(*item))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, ListingFilter};

    #[tokio::test]
    async fn test_listing_store_applies_condition() {
        let store = InMemoryListingStore::new(vec![
            ListingRecord::new("Alice", ItemId(1), 500),
            ListingRecord::new("Bob", ItemId(2), 1500),
        ]);
        let condition = ListingFilter::new().with_seller("Bob").condition();

        let rows = store.fetch_listings(&condition).await.unwrap();
        assert_eq!(rows, vec![ListingRecord::new("Bob", ItemId(2), 1500)]);
        assert_eq!(store.calls(), 1);
    }
}
