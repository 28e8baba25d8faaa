use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, QueryBuilder, Row, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;
use tracing::debug;

use super::sql::push_where;
use super::{ItemCatalog, ListingStore};
use crate::errors::StoreResult;
use crate::models::{ItemField, ItemId, ItemRecord, ListingField, ListingRecord};
use crate::query::Condition;

const LISTING_QUERY: &str = r#"
SELECT character_data.name AS charactername,
       trader.item_cost AS tradercost,
       trader.item_id AS item_id
FROM character_data
INNER JOIN trader
        ON character_data.id = trader.char_id"#;

const ITEM_QUERY: &str = "SELECT * FROM items";

/// Ids bound per item query. SQLite refuses statements with more than 32766
/// parameters; the rest of the item filter binds only a handful.
pub const DEFAULT_ID_BATCH: usize = 30_000;

async fn open_read_only(url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.read_only(true);
    debug!(url, "opening read-only store");
    SqlitePoolOptions::new().connect_with(options).await
}

/// The trader store: `trader` rows joined to `character_data` for seller names.
pub struct TraderDatabase {
    pool: SqlitePool,
}

impl TraderDatabase {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        Ok(Self::from_pool(open_read_only(url).await?))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for TraderDatabase {
    async fn fetch_listings(
        &self,
        condition: &Condition<ListingField>,
    ) -> StoreResult<Vec<ListingRecord>> {
        let mut qb = QueryBuilder::<Sqlite>::new(LISTING_QUERY);
        push_where(&mut qb, condition);
        debug!(sql = qb.sql(), "querying trader store");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> StoreResult<ListingRecord> {
                Ok(ListingRecord::new(
                    row.try_get::<String, _>("charactername")?,
                    ItemId(row.try_get("item_id")?),
                    row.try_get("tradercost")?,
                ))
            })
            .collect()
    }
}

/// The content store's `items` table.
pub struct ContentDatabase {
    pool: SqlitePool,
    id_batch: usize,
}

impl ContentDatabase {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        Ok(Self::from_pool(open_read_only(url).await?))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            id_batch: DEFAULT_ID_BATCH,
        }
    }

    /// Caps how many item ids a single statement binds; larger id sets are
    /// fetched in several queries.
    pub fn with_id_batch(mut self, id_batch: usize) -> Self {
        self.id_batch = id_batch.max(1);
        self
    }
}

fn decode_column(row: &SqliteRow, ordinal: usize) -> StoreResult<Value> {
    let raw = row.try_get_raw(ordinal)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let kind = raw.type_info().name().to_string();
    let value = match kind.as_str() {
        "INTEGER" | "BOOLEAN" | "NUMERIC" => Value::from(row.try_get::<i64, _>(ordinal)?),
        "REAL" => Value::from(row.try_get::<f64, _>(ordinal)?),
        "TEXT" => Value::from(row.try_get::<String, _>(ordinal)?),
        _ => Value::Null,
    };
    Ok(value)
}

fn decode_item(row: &SqliteRow) -> StoreResult<ItemRecord> {
    let mut attributes = Map::new();
    for column in row.columns() {
        attributes.insert(column.name().to_string(), decode_column(row, column.ordinal())?);
    }
    let id = attributes
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| sqlx::Error::ColumnNotFound("id".to_string()))?;
    Ok(ItemRecord::from_attributes(ItemId(id), attributes))
}

#[async_trait]
impl ItemCatalog for ContentDatabase {
    async fn fetch_items(&self, condition: &Condition<ItemField>) -> StoreResult<Vec<ItemRecord>> {
        let batches = condition.split_sets(self.id_batch);
        let mut items = Vec::new();
        for (batch, piece) in batches.iter().enumerate() {
            let mut qb = QueryBuilder::<Sqlite>::new(ITEM_QUERY);
            push_where(&mut qb, piece);
            debug!(batch, of = batches.len(), sql = qb.sql(), "querying content store");

            let rows = qb.build().fetch_all(&self.pool).await?;
            for row in &rows {
                items.push(decode_item(row)?);
            }
        }
        Ok(items)
    }
}
