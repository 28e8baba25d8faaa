use std::collections::BTreeSet;
use tracing::debug;

use crate::errors::{BazaarError, Result, StoreKind};
use crate::models::{ItemFilter, ItemId, ItemRecord};
use crate::storage::ItemCatalog;

/// Fetches the catalog rows for `ids` that also satisfy `filter`.
///
/// The id restriction is always part of the query, so the result is a subset
/// of `ids`. Callers skip this stage entirely when there are no candidates.
pub async fn query_items<C>(
    catalog: &C,
    ids: &BTreeSet<ItemId>,
    filter: &ItemFilter,
) -> Result<Vec<ItemRecord>>
where
    C: ItemCatalog + ?Sized,
{
    if ids.is_empty() {
        return Err(BazaarError::validation(
            "item query needs at least one candidate item id",
        ));
    }

    let condition = filter.condition(ids);
    let items = catalog
        .fetch_items(&condition)
        .await
        .map_err(BazaarError::store(StoreKind::Content))?;

    debug!(requested = ids.len(), matched = items.len(), "item stage complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryItemCatalog;

    fn catalog() -> InMemoryItemCatalog {
        InMemoryItemCatalog::new(vec![
            ItemRecord::new(ItemId(1), "Cloak of Flames").with("classes", 1),
            ItemRecord::new(ItemId(2), "Fungi Covered Great Staff").with("classes", 2),
            ItemRecord::new(ItemId(3), "Short Sword").with("classes", 3),
        ])
    }

    #[tokio::test]
    async fn test_result_is_subset_of_ids() {
        let ids = [ItemId(2), ItemId(3)].into();
        let items = query_items(&catalog(), &ids, &ItemFilter::new()).await.unwrap();
        let found: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(found, vec![ItemId(2), ItemId(3)]);
    }

    #[tokio::test]
    async fn test_attribute_filters_narrow_further() {
        let ids = [ItemId(1), ItemId(2), ItemId(3)].into();
        let filter = ItemFilter::new().with_classes(1).with_name("cloak");
        let items = query_items(&catalog(), &ids, &filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId(1));
    }

    #[tokio::test]
    async fn test_empty_id_set_is_rejected() {
        let c = catalog();
        let result = query_items(&c, &BTreeSet::new(), &ItemFilter::new()).await;
        assert!(matches!(result, Err(BazaarError::Validation(_))));
        assert_eq!(c.calls(), 0);
    }
}
