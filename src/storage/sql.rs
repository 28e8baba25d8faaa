use sqlx::{QueryBuilder, Sqlite};
use std::fmt::Debug;

use crate::models::{ItemField, ListingField};
use crate::query::{like_pattern, Condition, Operand, Predicate};

/// Maps a logical field onto the column expression a store query selects from.
pub trait SqlColumn: Copy + Debug {
    fn column(self) -> &'static str;
}

impl SqlColumn for ListingField {
    fn column(self) -> &'static str {
        match self {
            ListingField::Seller => "character_data.name",
            ListingField::Price => "trader.item_cost",
        }
    }
}

impl SqlColumn for ItemField {
    fn column(self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::Name => "Name",
            ItemField::Classes => "classes",
            ItemField::Races => "races",
            ItemField::ItemType => "itemtype",
            ItemField::Slots => "slots",
        }
    }
}

fn push_operand(qb: &mut QueryBuilder<'_, Sqlite>, value: &Operand) {
    match value {
        Operand::Int(v) => qb.push_bind(*v),
        Operand::Text(s) => qb.push_bind(s.clone()),
    };
}

/// Appends `condition` as a WHERE clause. Values are always bound, never inlined.
pub fn push_where<F: SqlColumn>(qb: &mut QueryBuilder<'_, Sqlite>, condition: &Condition<F>) {
    for (i, predicate) in condition.predicates().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        let column = predicate.field().column();
        match predicate {
            Predicate::Equals { value, .. } => {
                qb.push(column).push(" = ");
                push_operand(qb, value);
            }
            Predicate::AtLeast { value, .. } => {
                qb.push(column).push(" >= ").push_bind(*value);
            }
            Predicate::AtMost { value, .. } => {
                qb.push(column).push(" <= ").push_bind(*value);
            }
            Predicate::BitsOverlap { mask, .. } => {
                qb.push("(").push(column).push(" & ").push_bind(*mask).push(") != 0");
            }
            Predicate::InSet { values, .. } if values.is_empty() => {
                qb.push("1 = 0");
            }
            Predicate::InSet { values, .. } => {
                qb.push(column).push(" IN (");
                let mut list = qb.separated(", ");
                for value in values {
                    list.push_bind(*value);
                }
                list.push_unseparated(")");
            }
            Predicate::Contains { pattern, .. } => {
                qb.push(column).push(" LIKE ").push_bind(like_pattern(pattern));
            }
        }
    }
}
