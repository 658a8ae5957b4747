use crate::dom::Element;
use crate::error::UiResult;
use crate::views::{BasketView, RenderReport};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use storefront_core::error_handling::log_error;
use storefront_core::{
    BasketStore, CatalogSource, CatalogStore, EventBus, EventKind, StoreEvent, SubscriptionId,
    ViewConfig,
};

/// Wires the stores, the basket view and the event bus of one page.
///
/// All subscriptions, including the `ui:*` intents, are in place when
/// [`Storefront::mount`] returns. Dropping the storefront unsubscribes them.
pub struct Storefront {
    bus: EventBus,
    catalog: Rc<CatalogStore>,
    basket: Rc<BasketStore>,
    basket_view: Rc<RefCell<BasketView>>,
    subscriptions: Vec<SubscriptionId>,
}

impl Storefront {
    pub fn mount(container: Element, item_template: Element, slots: ViewConfig) -> UiResult<Self> {
        let bus = EventBus::new();
        let catalog = Rc::new(CatalogStore::new(bus.clone()));
        let basket = Rc::new(BasketStore::new(bus.clone()));
        let basket_view = Rc::new(RefCell::new(BasketView::new(
            container,
            item_template,
            slots,
            bus.clone(),
            Rc::clone(&catalog),
        )?));

        let mut subscriptions = Vec::with_capacity(4);

        let view = Rc::clone(&basket_view);
        subscriptions.push(bus.subscribe(EventKind::BasketChange, move |event| {
            if let StoreEvent::BasketChanged(change) = event {
                view.borrow_mut().render(&change.items)?;
            }
            Ok(())
        }));

        let view = Rc::clone(&basket_view);
        subscriptions.push(bus.subscribe(EventKind::CatalogChange, move |_| {
            view.borrow_mut().refresh()?;
            Ok(())
        }));

        let store = Rc::clone(&basket);
        subscriptions.push(bus.subscribe(EventKind::BasketAdd, move |event| {
            if let StoreEvent::BasketAddRequested(intent) = event {
                store.add(&intent.id);
            }
            Ok(())
        }));

        let store = Rc::clone(&basket);
        subscriptions.push(bus.subscribe(EventKind::BasketRemove, move |event| {
            if let StoreEvent::BasketRemoveRequested(intent) = event {
                store.remove(&intent.id);
            }
            Ok(())
        }));

        tracing::debug!("storefront mounted");
        Ok(Self {
            bus,
            catalog,
            basket,
            basket_view,
            subscriptions,
        })
    }

    /// Fetches the catalog and installs it. A failed fetch is logged and the
    /// catalog keeps its previous contents. Returns whether the fetch succeeded.
    pub async fn load_catalog<S>(&self, source: &S) -> bool
    where
        S: CatalogSource + ?Sized,
    {
        match source.fetch_catalog().await {
            Ok(products) => {
                self.catalog.set_items(products);
                true
            }
            Err(e) => {
                log_error("catalog fetch", &e);
                false
            }
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn basket(&self) -> &BasketStore {
        &self.basket
    }

    pub fn basket_view(&self) -> Ref<'_, BasketView> {
        self.basket_view.borrow()
    }

    pub fn rerender(&self) -> UiResult<RenderReport> {
        self.basket_view.borrow_mut().refresh()
    }
}

impl Drop for Storefront {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}
