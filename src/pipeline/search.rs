use serde::Serialize;
use tracing::{debug, info};

use super::enrich::{Annotation, Annotations, Enricher};
use super::items::query_items;
use super::join::{join_listings, JoinedRow};
use super::paginate::{window, Page, PageInfo, DEFAULT_PER_PAGE};
use super::sort::{sort_rows, Direction, SortField, SortKey};
use super::trader::query_listings;
use crate::config::BazaarConfig;
use crate::errors::{BazaarError, Result};
use crate::models::{ItemFilter, ItemId, ItemRecord, ListingFilter, Price, Stat};
use crate::storage::{ItemCatalog, ListingStore};

/// Everything a caller can ask of one bazaar search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub listing: ListingFilter,
    pub item: ItemFilter,
    /// Stat column to display alongside each row.
    pub stat: Option<Stat>,
    pub order_by: Option<String>,
    pub direction: Option<Direction>,
    pub offset: usize,
}

impl SearchRequest {
    /// With a stat selected, rows default to that stat, highest first.
    /// Otherwise they default to item name, A to Z.
    pub fn sort_key(&self) -> Result<SortKey> {
        let direction = self.direction.unwrap_or(match self.stat {
            Some(_) => Direction::Descending,
            None => Direction::Ascending,
        });
        match self.order_by.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => SortKey::resolve(name, direction),
            None => {
                let field = self.stat.map_or(SortField::ItemName, SortField::Stat);
                Ok(SortKey::new(field, direction))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    /// Position on the page.
    pub slot: usize,
    pub seller: String,
    pub price: Price,
    pub price_text: String,
    pub item_id: ItemId,
    pub name: String,
    pub icon: i64,
    pub item_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_value: Option<i64>,
    pub annotations: Vec<Annotation>,
    pub item: ItemRecord,
}

impl DisplayRow {
    fn build(
        slot: usize,
        row: &JoinedRow<'_>,
        stat: Option<Stat>,
        annotations: &Annotations,
    ) -> Self {
        Self {
            slot,
            seller: row.listing.seller.clone(),
            price: row.listing.price,
            price_text: row.listing.price.to_string(),
            item_id: row.item.id,
            name: row.item.name().to_string(),
            icon: row.item.icon(),
            item_type: row.item.item_type(),
            stat_value: stat.map(|s| row.item.int(s.column())),
            annotations: annotations.get(&row.item.id).cloned().unwrap_or_default(),
            item: row.item.clone(),
        }
    }
}

/// One page of results plus what the page was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    /// Matches after the join, before pagination.
    pub total: usize,
    pub page: PageInfo,
    pub order_by: String,
    pub direction: Direction,
    pub stat: Option<Stat>,
    pub stat_label: Option<&'static str>,
    /// Title-cased seller name when the search is one seller's store.
    pub store_name: Option<String>,
    pub rows: Vec<DisplayRow>,
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The marketplace search over a trader store and an item catalog.
pub struct Bazaar<L, C, E> {
    listings: L,
    catalog: C,
    enricher: E,
    per_page: usize,
    blocked: bool,
}

impl<L, C, E> Bazaar<L, C, E>
where
    L: ListingStore,
    C: ItemCatalog,
    E: Enricher,
{
    pub fn new(listings: L, catalog: C, enricher: E) -> Self {
        Self {
            listings,
            catalog,
            enricher,
            per_page: DEFAULT_PER_PAGE,
            blocked: false,
        }
    }

    pub fn with_config(mut self, config: &BazaarConfig) -> Self {
        self.per_page = config.per_page;
        self.blocked = config.blocked;
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn listings(&self) -> &L {
        &self.listings
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn enricher(&self) -> &E {
        &self.enricher
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if self.blocked {
            return Err(BazaarError::Disabled);
        }
        if self.per_page == 0 {
            return Err(BazaarError::Config("per_page must be at least 1".to_string()));
        }
        request.listing.validate()?;
        request.item.validate()?;
        let sort = request.sort_key()?;
        let page = Page::new(request.offset, self.per_page);

        let candidates = query_listings(&self.listings, &request.listing).await?;

        let (total, rows) = if candidates.is_empty() {
            debug!("no listings matched, skipping item stage");
            (0, Vec::new())
        } else {
            let items = query_items(&self.catalog, &candidates.item_ids, &request.item).await?;
            let mut joined = join_listings(&candidates.listings, &items);
            sort_rows(&mut joined, &sort);

            let total = joined.len();
            let shown = window(&joined, page);
            let annotations = if shown.is_empty() {
                Annotations::new()
            } else {
                self.enricher.enrich(shown).await?
            };
            let rows = shown
                .iter()
                .enumerate()
                .map(|(slot, row)| DisplayRow::build(slot, row, request.stat, &annotations))
                .collect::<Vec<_>>();
            (total, rows)
        };

        info!(
            total,
            shown = rows.len(),
            offset = page.offset,
            order_by = %sort.order_by,
            direction = %sort.direction,
            "bazaar search complete"
        );

        Ok(SearchPage {
            total,
            page: PageInfo::new(page, total),
            order_by: sort.order_by,
            direction: sort.direction,
            stat: request.stat,
            stat_label: request.stat.map(Stat::label),
            store_name: request.listing.seller.as_deref().map(title_case),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_without_stat() {
        let key = SearchRequest::default().sort_key().unwrap();
        assert_eq!(key, SortKey::new(SortField::ItemName, Direction::Ascending));
    }

    #[test]
    fn test_default_sort_with_stat() {
        let request = SearchRequest {
            stat: Some(Stat::HitPoints),
            ..Default::default()
        };
        let key = request.sort_key().unwrap();
        assert_eq!(key.field, Some(SortField::Stat(Stat::HitPoints)));
        assert_eq!(key.direction, Direction::Descending);
    }

    #[test]
    fn test_explicit_sort_wins() {
        let request = SearchRequest {
            stat: Some(Stat::Mana),
            order_by: Some("tradercost".to_string()),
            direction: Some(Direction::Ascending),
            ..Default::default()
        };
        let key = request.sort_key().unwrap();
        assert_eq!(key.field, Some(SortField::Price));
        assert_eq!(key.direction, Direction::Ascending);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("FIZZLEbang"), "Fizzlebang");
        assert_eq!(title_case("bob"), "Bob");
    }
}
