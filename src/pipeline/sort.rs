use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::join::JoinedRow;
use crate::errors::{BazaarError, Result};
use crate::models::Stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Case-insensitive string comparison.
    Lexical,
    /// Integer comparison.
    Numeric,
}

/// Every column the joined rows can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Seller,
    ItemName,
    Price,
    Stat(Stat),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Int(i64),
}

impl SortField {
    pub fn from_name(name: &str) -> Option<SortField> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(SortField::ItemName),
            "charactername" | "seller" => Some(SortField::Seller),
            "tradercost" | "price" => Some(SortField::Price),
            other => Stat::from_column(other).map(SortField::Stat),
        }
    }

    /// Canonical request name, as accepted by [`SortField::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            SortField::Seller => "charactername",
            SortField::ItemName => "Name",
            SortField::Price => "tradercost",
            SortField::Stat(stat) => stat.column(),
        }
    }

    pub fn kind(self) -> SortKind {
        match self {
            SortField::Seller | SortField::ItemName => SortKind::Lexical,
            SortField::Price | SortField::Stat(_) => SortKind::Numeric,
        }
    }

    fn value(self, row: &JoinedRow<'_>) -> SortValue {
        match self {
            SortField::Seller => SortValue::Text(row.listing.seller.to_lowercase()),
            SortField::ItemName => SortValue::Text(row.item.name().to_lowercase()),
            SortField::Price => SortValue::Int(row.listing.price.copper()),
            SortField::Stat(stat) => SortValue::Int(row.item.int(stat.column())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl FromStr for Direction {
    type Err = BazaarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Ascending),
            "desc" => Ok(Direction::Descending),
            _ => Err(BazaarError::validation(format!(
                "direction must be ASC or DESC, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ASC"),
            Direction::Descending => write!(f, "DESC"),
        }
    }
}

/// A requested ordering. `field` is `None` when the name is not a sortable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub order_by: String,
    pub field: Option<SortField>,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self {
            order_by: field.name().to_string(),
            field: Some(field),
            direction,
        }
    }

    /// Resolves a requested column name. Names must be alphabetic; unknown
    /// alphabetic names are accepted and leave the rows in their input order.
    pub fn resolve(order_by: &str, direction: Direction) -> Result<Self> {
        if !order_by.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BazaarError::validation(format!(
                "sort field '{}' may only contain letters",
                order_by
            )));
        }
        Ok(Self {
            order_by: order_by.to_string(),
            field: SortField::from_name(order_by),
            direction,
        })
    }
}

/// Stable sort of `rows` by `key`. Ties keep their input order in both directions.
pub fn sort_rows(rows: &mut Vec<JoinedRow<'_>>, key: &SortKey) {
    let Some(field) = key.field else {
        warn!(order_by = %key.order_by, "unsortable field, keeping input order");
        return;
    };

    let mut keyed: Vec<(SortValue, JoinedRow<'_>)> =
        rows.drain(..).map(|row| (field.value(&row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| key.direction.apply(a.cmp(b)));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}
