pub mod item;
pub mod listing;
pub mod stats;

pub use item::{
    ItemField,
    ItemFilter,
    ItemId,
    ItemRecord,
};

pub use listing::{
    ListingField,
    ListingFilter,
    ListingRecord,
    Price,
    PRICE_TIER_SCALE,
};

pub use stats::Stat;
