use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use super::join::JoinedRow;
use crate::errors::Result;
use crate::models::ItemId;

/// Which item column referenced a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Click,
    Proc,
    Worn,
    Focus,
    Scroll,
    Bard,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Click,
        EffectKind::Proc,
        EffectKind::Worn,
        EffectKind::Focus,
        EffectKind::Scroll,
        EffectKind::Bard,
    ];

    pub fn column(self) -> &'static str {
        match self {
            EffectKind::Click => "clickeffect",
            EffectKind::Proc => "proceffect",
            EffectKind::Worn => "worneffect",
            EffectKind::Focus => "focuseffect",
            EffectKind::Scroll => "scrolleffect",
            EffectKind::Bard => "bardeffect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub kind: EffectKind,
    pub spell_id: i64,
    /// Filled in by engines that resolve spell data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub type Annotations = HashMap<ItemId, Vec<Annotation>>;

/// Computes display annotations for the rows of one page.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, rows: &[JoinedRow<'_>]) -> Result<Annotations>;
}

/// Annotates each item with the spell ids its effect columns reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemEffects;

#[async_trait]
impl Enricher for ItemEffects {
    async fn enrich(&self, rows: &[JoinedRow<'_>]) -> Result<Annotations> {
        let mut annotations = Annotations::new();
        for row in rows {
            annotations.entry(row.item.id).or_insert_with(|| {
                EffectKind::ALL
                    .into_iter()
                    .filter_map(|kind| {
                        let spell_id = row.item.int(kind.column());
                        (spell_id > 0).then_some(Annotation {
                            kind,
                            spell_id,
                            name: None,
                        })
                    })
                    .collect()
            });
        }
        Ok(annotations)
    }
}

/// An enricher that attaches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

#[async_trait]
impl Enricher for NoEnrichment {
    async fn enrich(&self, _rows: &[JoinedRow<'_>]) -> Result<Annotations> {
        Ok(Annotations::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemRecord, ListingRecord};

    #[tokio::test]
    async fn test_item_effects_reads_effect_columns() {
        let listing = ListingRecord::new("Alice", ItemId(9), 100);
        let item = ItemRecord::new(ItemId(9), "Staff")
            .with("clickeffect", 2021)
            .with("proceffect", 0)
            .with("worneffect", -1)
            .with("focuseffect", 1200);
        let rows = [JoinedRow {
            listing: &listing,
            item: &item,
        }];

        let annotations = ItemEffects.enrich(&rows).await.unwrap();
        let found = &annotations[&ItemId(9)];
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, EffectKind::Click);
        assert_eq!(found[0].spell_id, 2021);
        assert_eq!(found[1].kind, EffectKind::Focus);
    }

    #[tokio::test]
    async fn test_no_enrichment_is_empty() {
        assert!(NoEnrichment.enrich(&[]).await.unwrap().is_empty());
    }
}
