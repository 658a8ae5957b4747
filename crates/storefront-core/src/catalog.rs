use crate::bus::EventBus;
use crate::error::{CoreError, CoreResult};
use crate::events::{CatalogChange, StoreEvent};
use crate::model::{Product, ProductId};
use std::cell::RefCell;
use std::collections::HashMap;

/// Holds the products fetched from the remote catalog.
///
/// The held sequence is replaced wholesale by [`CatalogStore::set_items`];
/// there are no partial updates. Identifiers are unique within it.
#[derive(Debug)]
pub struct CatalogStore {
    bus: EventBus,
    state: RefCell<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    items: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl CatalogStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            state: RefCell::new(CatalogState::default()),
        }
    }

    /// Replaces the catalog and publishes `catalog:change`. When an id occurs
    /// more than once the first product wins.
    pub fn set_items(&self, products: Vec<Product>) {
        let count = {
            let mut state = self.state.borrow_mut();
            state.items.clear();
            state.index.clear();
            for product in products {
                if state.index.contains_key(&product.id) {
                    tracing::warn!(id = %product.id, "duplicate product in catalog, keeping first");
                    continue;
                }
                let position = state.items.len();
                state.index.insert(product.id.clone(), position);
                state.items.push(product);
            }
            state.items.len()
        };

        tracing::info!(count, "catalog replaced");
        self.bus
            .publish(StoreEvent::CatalogChanged(CatalogChange { count }));
    }

    pub fn get_product(&self, id: &str) -> CoreResult<Product> {
        let state = self.state.borrow();
        state
            .index
            .get(id)
            .map(|&position| state.items[position].clone())
            .ok_or_else(|| CoreError::not_found(id))
    }

    pub fn items(&self) -> Vec<Product> {
        self.state.borrow().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn product(id: &str, title: &str) -> Product {
        Product::new(ProductId::new(id).unwrap(), title)
    }

    #[test]
    fn lookup_after_set_items() {
        let catalog = CatalogStore::new(EventBus::new());
        catalog.set_items(vec![product("p1", "Widget"), product("p2", "Gadget")]);

        assert_eq!(catalog.get_product("p2").unwrap(), product("p2", "Gadget"));
        let err = catalog.get_product("p3").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn set_items_replaces_without_merging() {
        let catalog = CatalogStore::new(EventBus::new());
        catalog.set_items(vec![product("p1", "Widget")]);
        catalog.set_items(vec![product("p2", "Gadget")]);

        assert!(catalog.get_product("p1").is_err());
        assert_eq!(catalog.items(), vec![product("p2", "Gadget")]);
    }

    #[test]
    fn duplicate_ids_keep_first_product() {
        let catalog = CatalogStore::new(EventBus::new());
        catalog.set_items(vec![
            product("p1", "Widget"),
            product("p1", "Impostor"),
            product("p2", "Gadget"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_product("p1").unwrap().title, "Widget");
    }

    #[test]
    fn empty_catalog_reports_not_found() {
        let catalog = CatalogStore::new(EventBus::new());
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.get_product("p1"),
            Err(CoreError::NotFound { id }) if id == "p1"
        ));
    }

    #[test]
    fn set_items_publishes_catalog_change() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(EventKind::CatalogChange, move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

        let catalog = CatalogStore::new(bus);
        catalog.set_items(vec![product("p1", "Widget")]);

        assert_eq!(
            *seen.borrow(),
            vec![StoreEvent::CatalogChanged(CatalogChange { count: 1 })]
        );
    }
}
