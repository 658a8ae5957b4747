pub mod basket;
pub mod basket_item;

pub use basket::{BasketView, RenderReport};
pub use basket_item::BasketItemView;

use crate::dom::Element;
use crate::error::{UiError, UiResult};

pub(crate) fn slot(container: &Element, selector: &str) -> UiResult<Element> {
    container
        .query_selector(selector)
        .ok_or_else(|| UiError::MissingSlot {
            selector: selector.to_string(),
        })
}
