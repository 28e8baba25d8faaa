pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod storage;

pub use config::BazaarConfig;
pub use errors::{BazaarError, Result};
pub use pipeline::{Bazaar, SearchPage, SearchRequest};
