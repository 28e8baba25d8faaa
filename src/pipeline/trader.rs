use std::collections::BTreeSet;
use tracing::debug;

use crate::errors::{BazaarError, Result, StoreKind};
use crate::models::{ItemId, ListingFilter, ListingRecord};
use crate::query::id_set;
use crate::storage::ListingStore;

/// Listings that passed the seller-side filters, and the items they reference.
#[derive(Debug, Clone, Default)]
pub struct CandidateListings {
    pub listings: Vec<ListingRecord>,
    pub item_ids: BTreeSet<ItemId>,
}

impl CandidateListings {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

pub async fn query_listings<S>(store: &S, filter: &ListingFilter) -> Result<CandidateListings>
where
    S: ListingStore + ?Sized,
{
    let condition = filter.condition();
    let listings = store
        .fetch_listings(&condition)
        .await
        .map_err(BazaarError::store(StoreKind::Trader))?;
    let item_ids = id_set(&listings, |listing| listing.item_id);

    debug!(
        listings = listings.len(),
        items = item_ids.len(),
        "trader stage complete"
    );
    Ok(CandidateListings { listings, item_ids })
}
