use super::slot;
use crate::dom::Element;
use crate::error::UiResult;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::{EventBus, Product, ProductId, StoreEvent, ViewConfig};

/// One basket row. Its add and remove buttons publish `ui:basket-add` and
/// `ui:basket-remove` for the product it last rendered.
pub struct BasketItemView {
    container: Element,
    title: Element,
    current: Rc<RefCell<Option<ProductId>>>,
}

impl BasketItemView {
    pub fn new(container: Element, bus: &EventBus, slots: &ViewConfig) -> UiResult<Self> {
        let title = slot(&container, &slots.item_title)?;
        let add = slot(&container, &slots.item_add)?;
        let remove = slot(&container, &slots.item_remove)?;

        let current = Rc::new(RefCell::new(None));
        bind_intent(&add, bus, &current, StoreEvent::basket_add);
        bind_intent(&remove, bus, &current, StoreEvent::basket_remove);

        Ok(Self {
            container,
            title,
            current,
        })
    }

    pub fn render(&self, product: &Product) -> Element {
        *self.current.borrow_mut() = Some(product.id.clone());
        self.title.set_text_content(&product.title);
        self.container.clone()
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.current.borrow().clone()
    }

    pub fn element(&self) -> &Element {
        &self.container
    }
}

fn bind_intent(
    button: &Element,
    bus: &EventBus,
    current: &Rc<RefCell<Option<ProductId>>>,
    intent: fn(ProductId) -> StoreEvent,
) {
    let bus = bus.clone();
    let current = Rc::clone(current);
    button.add_click_listener(move || {
        let id = current.borrow().clone();
        match id {
            Some(id) => bus.publish(intent(id)),
            None => tracing::debug!("click on a basket row that was never rendered"),
        }
    });
}
