use crate::bus::EventBus;
use crate::events::{BasketChange, StoreEvent};
use crate::model::ProductId;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Product ids in the basket with their quantities.
///
/// Every present id has a quantity of at least one; removing the last unit
/// drops the id. Each `add` or `remove` publishes exactly one `basket:change`
/// with the ids in first-added order.
#[derive(Debug)]
pub struct BasketStore {
    bus: EventBus,
    lines: RefCell<BasketLines>,
}

#[derive(Debug, Default)]
struct BasketLines {
    order: Vec<ProductId>,
    quantities: HashMap<ProductId, u32>,
}

impl BasketLines {
    fn snapshot(&self) -> Vec<ProductId> {
        self.order.clone()
    }
}

impl BasketStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            lines: RefCell::new(BasketLines::default()),
        }
    }

    pub fn add(&self, id: &ProductId) {
        let items = {
            let mut guard = self.lines.borrow_mut();
            let lines = &mut *guard;
            match lines.quantities.entry(id.clone()) {
                Entry::Occupied(mut entry) => {
                    let quantity = entry.get_mut();
                    *quantity = quantity.saturating_add(1);
                }
                Entry::Vacant(entry) => {
                    entry.insert(1);
                    lines.order.push(id.clone());
                }
            }
            lines.snapshot()
        };
        tracing::debug!(id = %id, "basket add");
        self.changed(items);
    }

    /// Removing an id that is not in the basket changes nothing but still
    /// publishes `basket:change`.
    pub fn remove(&self, id: &ProductId) {
        let items = {
            let mut lines = self.lines.borrow_mut();
            match lines.quantities.get(id).copied() {
                Some(quantity) if quantity > 1 => {
                    lines.quantities.insert(id.clone(), quantity - 1);
                }
                Some(_) => {
                    lines.quantities.remove(id);
                    lines.order.retain(|present| present != id);
                }
                None => tracing::debug!(id = %id, "remove of absent basket item"),
            }
            lines.snapshot()
        };
        tracing::debug!(id = %id, "basket remove");
        self.changed(items);
    }

    /// Zero for ids not in the basket.
    pub fn quantity(&self, id: &str) -> u32 {
        self.lines.borrow().quantities.get(id).copied().unwrap_or(0)
    }

    pub fn items(&self) -> Vec<ProductId> {
        self.lines.borrow().snapshot()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn changed(&self, items: Vec<ProductId>) {
        self.bus
            .publish(StoreEvent::BasketChanged(BasketChange { items }));
    }
}
