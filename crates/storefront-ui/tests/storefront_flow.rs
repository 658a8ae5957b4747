use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use storefront_core::client::parse_catalog;
use storefront_core::{
    CatalogSource, CoreError, CoreResult, EventKind, HttpCatalogClient, Product, ProductId,
    StoreEvent, ViewConfig,
};
use storefront_ui::{Element, Storefront, UiError};

enum FakeCatalog {
    Products(Vec<(&'static str, &'static str)>),
    Garbled,
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_catalog(&self) -> CoreResult<Vec<Product>> {
        match self {
            FakeCatalog::Products(items) => Ok(items
                .iter()
                .map(|(raw, title)| Product::new(id(raw), *title))
                .collect()),
            FakeCatalog::Garbled => Err(parse_catalog(b"<html>502 Bad Gateway</html>")
                .expect_err("html is not a catalog")),
        }
    }
}

fn id(raw: &str) -> ProductId {
    ProductId::new(raw).unwrap()
}

fn item_template() -> Element {
    Element::new("li")
        .with_class("basket-item")
        .with_child(Element::new("span").with_class("basket-item__title"))
        .with_child(Element::new("button").with_class("basket-item__add"))
        .with_child(Element::new("button").with_class("basket-item__remove"))
}

fn mount() -> (Storefront, Element) {
    let container = Element::new("ul").with_class("basket__list");
    let storefront = Storefront::mount(container.clone(), item_template(), ViewConfig::default())
        .expect("mount");
    (storefront, container)
}

#[tokio::test]
async fn add_twice_remove_once_leaves_one_row() {
    let (storefront, container) = mount();
    assert!(
        storefront
            .load_catalog(&FakeCatalog::Products(vec![("p1", "Widget")]))
            .await
    );

    let bus = storefront.bus();
    bus.publish(StoreEvent::basket_add(id("p1")));
    bus.publish(StoreEvent::basket_add(id("p1")));
    bus.publish(StoreEvent::basket_remove(id("p1")));

    assert_eq!(storefront.basket().quantity("p1"), 1);
    assert_eq!(storefront.basket().items(), vec![id("p1")]);
    assert_eq!(container.children().len(), 1);
    assert_eq!(storefront.basket_view().titles(), vec!["Widget"]);
}

#[tokio::test]
async fn failed_fetch_leaves_catalog_empty_but_basket_still_updates() {
    let (storefront, container) = mount();
    assert!(!storefront.load_catalog(&FakeCatalog::Garbled).await);
    assert!(storefront.catalog().is_empty());

    storefront.bus().publish(StoreEvent::basket_add(id("p1")));

    assert_eq!(storefront.basket().quantity("p1"), 1);
    assert!(container.children().is_empty());
    let report = storefront.rerender().unwrap();
    assert_eq!(report.missing, vec![id("p1")]);
}

#[tokio::test]
async fn rows_appear_once_a_late_catalog_arrives() {
    let (storefront, container) = mount();
    storefront.bus().publish(StoreEvent::basket_add(id("p1")));
    assert!(container.children().is_empty());

    storefront
        .load_catalog(&FakeCatalog::Products(vec![("p1", "Widget"), ("p2", "Gadget")]))
        .await;

    assert_eq!(storefront.basket_view().titles(), vec!["Widget"]);
}

#[tokio::test]
async fn row_buttons_drive_the_basket() {
    let (storefront, container) = mount();
    storefront
        .load_catalog(&FakeCatalog::Products(vec![("p1", "Widget"), ("p2", "Gadget")]))
        .await;
    storefront.bus().publish(StoreEvent::basket_add(id("p1")));
    storefront.bus().publish(StoreEvent::basket_add(id("p2")));

    let first = container.children()[0].clone();
    first.query_selector(".basket-item__add").unwrap().click();
    assert_eq!(storefront.basket().quantity("p1"), 2);

    first.query_selector(".basket-item__remove").unwrap().click();
    first.query_selector(".basket-item__remove").unwrap().click();

    assert_eq!(storefront.basket().quantity("p1"), 0);
    assert_eq!(storefront.basket_view().titles(), vec!["Gadget"]);
}

#[tokio::test]
async fn every_intent_yields_exactly_one_change_notification() {
    let (storefront, _) = mount();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    storefront
        .bus()
        .subscribe(EventKind::BasketChange, move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

    storefront.bus().publish(StoreEvent::basket_add(id("p1")));
    storefront.bus().publish(StoreEvent::basket_remove(id("never-added")));

    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn mount_rejects_template_without_remove_button() {
    let template = Element::new("li")
        .with_child(Element::new("span").with_class("basket-item__title"))
        .with_child(Element::new("button").with_class("basket-item__add"));

    let result = Storefront::mount(Element::new("ul"), template, ViewConfig::default());

    assert!(matches!(
        result,
        Err(UiError::MissingSlot { selector }) if selector == ".basket-item__remove"
    ));
}

#[test]
fn dropping_the_storefront_releases_its_subscriptions() {
    let (storefront, _) = mount();
    let bus = storefront.bus().clone();
    assert_eq!(bus.subscriber_count(EventKind::BasketAdd), 1);

    drop(storefront);

    for kind in EventKind::ALL {
        assert_eq!(bus.subscriber_count(kind), 0);
    }
}

#[tokio::test]
async fn garbled_response_is_a_decode_failure() {
    let err = FakeCatalog::Garbled.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CoreError::Decode(_)));
}

#[tokio::test]
async fn unreachable_catalog_server_is_survived() {
    let (storefront, container) = mount();
    // Nothing listens on the discard port; the connection is refused.
    let client = HttpCatalogClient::new("http://127.0.0.1:9/product", Duration::from_secs(2))
        .unwrap();
    let err = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CoreError::Fetch(_)));

    assert!(!storefront.load_catalog(&client).await);
    storefront.bus().publish(StoreEvent::basket_add(id("p1")));

    assert!(storefront.catalog().is_empty());
    assert_eq!(storefront.basket().quantity("p1"), 1);
    assert!(container.children().is_empty());
}
