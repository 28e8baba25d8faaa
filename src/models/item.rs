use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::{BazaarError, Result};
use crate::query::{Condition, FieldSource, Operand, Predicate};

static ITEM_NAME_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\- ']*$").expect("valid item name pattern"));

/// Primary key of an item definition in the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item definition from the content store: its id plus every column of its row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    #[serde(skip)]
    pub id: ItemId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ItemRecord {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("id".to_string(), Value::from(id.0));
        attributes.insert("Name".to_string(), Value::from(name.into()));
        Self { id, attributes }
    }

    pub fn from_attributes(id: ItemId, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(column.to_string(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        self.attributes
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn icon(&self) -> i64 {
        self.int("icon")
    }

    pub fn item_type(&self) -> i64 {
        self.int("itemtype")
    }

    /// Reads a column as an integer. Missing or non-numeric values read as 0.
    pub fn int(&self, column: &str) -> i64 {
        match self.attributes.get(column) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Id,
    Name,
    Classes,
    Races,
    ItemType,
    Slots,
}

impl FieldSource<ItemField> for ItemRecord {
    fn field_value(&self, field: ItemField) -> Operand {
        match field {
            ItemField::Id => Operand::Int(self.id.0),
            ItemField::Name => Operand::Text(self.name().to_string()),
            ItemField::Classes => Operand::Int(self.int("classes")),
            ItemField::Races => Operand::Int(self.int("races")),
            ItemField::ItemType => Operand::Int(self.item_type()),
            ItemField::Slots => Operand::Int(self.int("slots")),
        }
    }
}

/// Item attribute constraints. Bitmask filters match on any shared bit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub classes: Option<i64>,
    pub races: Option<i64>,
    pub item_type: Option<i64>,
    pub slots: Option<i64>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn with_classes(mut self, mask: i64) -> Self {
        self.classes = Some(mask);
        self
    }

    pub fn with_races(mut self, mask: i64) -> Self {
        self.races = Some(mask);
        self
    }

    pub fn with_item_type(mut self, item_type: i64) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_slots(mut self, mask: i64) -> Self {
        self.slots = Some(mask);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !ITEM_NAME_QUERY.is_match(name) {
                return Err(BazaarError::validation(format!(
                    "item name '{}' may only contain letters, digits, spaces, '-' and '''",
                    name
                )));
            }
        }
        let numeric = [
            ("class", self.classes),
            ("race", self.races),
            ("item type", self.item_type),
            ("slot", self.slots),
        ];
        for (label, value) in numeric {
            if value.is_some_and(|v| v < 0) {
                return Err(BazaarError::validation(format!("{} must not be negative", label)));
            }
        }
        Ok(())
    }

    /// The full item condition: membership in `ids` plus whichever attributes are set.
    pub fn condition(&self, ids: &BTreeSet<ItemId>) -> Condition<ItemField> {
        Condition::all()
            .and(Predicate::InSet {
                field: ItemField::Id,
                values: ids.iter().map(|id| id.0).collect(),
            })
            .and_some(self.name.clone(), |pattern| Predicate::Contains {
                field: ItemField::Name,
                pattern,
            })
            .and_some(self.classes, |mask| Predicate::BitsOverlap {
                field: ItemField::Classes,
                mask,
            })
            .and_some(self.races, |mask| Predicate::BitsOverlap {
                field: ItemField::Races,
                mask,
            })
            .and_some(self.item_type, |value| Predicate::Equals {
                field: ItemField::ItemType,
                value: Operand::Int(value),
            })
            .and_some(self.slots, |mask| Predicate::BitsOverlap {
                field: ItemField::Slots,
                mask,
            })
    }
}
