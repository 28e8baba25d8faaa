//! The bazaar search pipeline: trader query, item query, join, sort, paginate, enrich.

mod enrich;
mod items;
mod join;
mod paginate;
mod search;
mod sort;
mod trader;

pub use enrich::{Annotation, Annotations, EffectKind, Enricher, ItemEffects, NoEnrichment};
pub use items::query_items;
pub use join::{inner_join, join_listings, JoinedRow};
pub use paginate::{window, Page, PageInfo, DEFAULT_PER_PAGE};
pub use search::{Bazaar, DisplayRow, SearchPage, SearchRequest};
pub use sort::{sort_rows, Direction, SortField, SortKey, SortKind};
pub use trader::{query_listings, CandidateListings};
