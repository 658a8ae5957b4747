pub mod dom;
pub mod error;
pub mod storefront;
pub mod views;

pub use dom::Element;
pub use error::{UiError, UiResult};
pub use storefront::Storefront;
pub use views::{BasketItemView, BasketView, RenderReport};
