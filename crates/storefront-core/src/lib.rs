pub mod basket;
pub mod bus;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod error_handling;
pub mod events;
pub mod logging;
pub mod model;

pub use basket::BasketStore;
pub use bus::{EventBus, SubscriptionId};
pub use catalog::CatalogStore;
pub use client::{CatalogSource, HttpCatalogClient};
pub use config::{CatalogConfig, CoreConfig, DemoConfig, ViewConfig};
pub use error::{CoreError, CoreResult};
pub use events::{BasketChange, CatalogChange, EventKind, ItemIntent, StoreEvent};
pub use model::{Product, ProductId};
