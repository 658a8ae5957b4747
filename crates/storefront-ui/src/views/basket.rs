//! Basket container view.
//!
//! Rows are reconciled by product id: a row view is created the first time an
//! id appears, re-rendered in place while the id stays in the basket and
//! dropped once the id is gone. The container's children always follow the
//! order of the last key list.

use super::{slot, BasketItemView};
use crate::dom::Element;
use crate::error::UiResult;
use std::collections::HashMap;
use std::rc::Rc;
use storefront_core::error_handling::log_warning;
use storefront_core::{CatalogStore, EventBus, ProductId, ViewConfig};

pub struct BasketView {
    container: Element,
    template: Element,
    slots: ViewConfig,
    bus: EventBus,
    catalog: Rc<CatalogStore>,
    rows: HashMap<ProductId, BasketItemView>,
    last_items: Vec<ProductId>,
}

/// Outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<ProductId>,
    pub missing: Vec<ProductId>,
}

impl BasketView {
    /// `template` is cloned for every new row and must contain all slots
    /// named in `slots`.
    pub fn new(
        container: Element,
        template: Element,
        slots: ViewConfig,
        bus: EventBus,
        catalog: Rc<CatalogStore>,
    ) -> UiResult<Self> {
        for selector in [&slots.item_title, &slots.item_add, &slots.item_remove] {
            slot(&template, selector)?;
        }
        Ok(Self {
            container,
            template,
            slots,
            bus,
            catalog,
            rows: HashMap::new(),
            last_items: Vec::new(),
        })
    }

    /// Ids missing from the catalog are skipped and reported; the rest of
    /// the basket still renders.
    pub fn render(&mut self, items: &[ProductId]) -> UiResult<RenderReport> {
        self.last_items = items.to_vec();

        let mut report = RenderReport::default();
        let mut children = Vec::with_capacity(items.len());
        let mut live: HashMap<ProductId, BasketItemView> = HashMap::with_capacity(items.len());

        for id in items {
            if live.contains_key(id) {
                continue;
            }
            let product = match self.catalog.get_product(id.as_str()) {
                Ok(product) => product,
                Err(e) => {
                    log_warning("basket render", &e);
                    report.missing.push(id.clone());
                    continue;
                }
            };
            let row = match self.rows.remove(id) {
                Some(row) => row,
                None => BasketItemView::new(self.template.deep_clone(), &self.bus, &self.slots)?,
            };
            children.push(row.render(&product));
            live.insert(id.clone(), row);
            report.rendered.push(id.clone());
        }

        // Whatever is left in `rows` fell out of the basket.
        self.rows = live;
        self.container.replace_children(children);

        tracing::debug!(
            rendered = report.rendered.len(),
            missing = report.missing.len(),
            "basket rendered"
        );
        Ok(report)
    }

    /// Renders the last key list again, e.g. after the catalog changed.
    pub fn refresh(&mut self) -> UiResult<RenderReport> {
        let items = self.last_items.clone();
        self.render(&items)
    }

    pub fn row(&self, id: &str) -> Option<&BasketItemView> {
        self.rows.get(id)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Titles currently shown, in container order.
    pub fn titles(&self) -> Vec<String> {
        self.container
            .children()
            .iter()
            .filter_map(|row| row.query_selector(&self.slots.item_title))
            .map(|title| title.text_content())
            .collect()
    }
}
