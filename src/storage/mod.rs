mod database;
mod in_memory;
mod sql;

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::models::{ItemField, ItemRecord, ListingField, ListingRecord};
use crate::query::Condition;

pub use database::{ContentDatabase, TraderDatabase, DEFAULT_ID_BATCH};
pub use in_memory::{InMemoryItemCatalog, InMemoryListingStore};
pub use sql::{push_where, SqlColumn};

/// Read access to the trader store: listings joined with their sellers.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn fetch_listings(
        &self,
        condition: &Condition<ListingField>,
    ) -> StoreResult<Vec<ListingRecord>>;
}

/// Read access to the item catalog in the content store.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    async fn fetch_items(&self, condition: &Condition<ItemField>) -> StoreResult<Vec<ItemRecord>>;
}
