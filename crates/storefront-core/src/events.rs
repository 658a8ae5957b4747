//! Typed events exchanged over the [`EventBus`](crate::bus::EventBus).
//!
//! Every event has a wire name and a payload; serialized, an event is the
//! envelope `{ "name": "basket:change", "payload": { ... } }`.

use crate::model::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum StoreEvent {
    /// The basket was mutated. Carries the full list of distinct ids.
    #[serde(rename = "basket:change")]
    BasketChanged(BasketChange),
    #[serde(rename = "ui:basket-add")]
    BasketAddRequested(ItemIntent),
    #[serde(rename = "ui:basket-remove")]
    BasketRemoveRequested(ItemIntent),
    /// The catalog was replaced.
    #[serde(rename = "catalog:change")]
    CatalogChanged(CatalogChange),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasketChange {
    pub items: Vec<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIntent {
    pub id: ProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogChange {
    pub count: usize,
}

/// Subscription key. Matching is exact, one kind per event variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BasketChange,
    BasketAdd,
    BasketRemove,
    CatalogChange,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::BasketChange,
        EventKind::BasketAdd,
        EventKind::BasketRemove,
        EventKind::CatalogChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BasketChange => "basket:change",
            EventKind::BasketAdd => "ui:basket-add",
            EventKind::BasketRemove => "ui:basket-remove",
            EventKind::CatalogChange => "catalog:change",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::BasketChanged(_) => EventKind::BasketChange,
            StoreEvent::BasketAddRequested(_) => EventKind::BasketAdd,
            StoreEvent::BasketRemoveRequested(_) => EventKind::BasketRemove,
            StoreEvent::CatalogChanged(_) => EventKind::CatalogChange,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn basket_add(id: ProductId) -> Self {
        StoreEvent::BasketAddRequested(ItemIntent { id })
    }

    pub fn basket_remove(id: ProductId) -> Self {
        StoreEvent::BasketRemoveRequested(ItemIntent { id })
    }
}
