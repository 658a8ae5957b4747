use anyhow::Context;
use std::path::PathBuf;
use std::rc::Rc;
use storefront_core::error_handling::log_error;
use storefront_core::logging::{init_logging, init_logging_with};
use storefront_core::{CoreConfig, EventKind, HttpCatalogClient};
use storefront_ui::{Element, Storefront};

struct Page {
    basket_list: Element,
    item_template: Element,
}

/// The markup the storefront is mounted into.
fn build_page(cfg: &CoreConfig) -> Page {
    let class_of = |selector: &str| selector.trim_start_matches('.').to_string();
    let item_template = Element::new("li")
        .with_class("basket-item")
        .with_child(Element::new("span").with_class(&class_of(&cfg.view.item_title)))
        .with_child(Element::new("button").with_class(&class_of(&cfg.view.item_add)))
        .with_child(Element::new("button").with_class(&class_of(&cfg.view.item_remove)));
    let basket_list = Element::new("ul").with_class("basket__list");
    Page {
        basket_list,
        item_template,
    }
}

fn load_config() -> anyhow::Result<CoreConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CoreConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(CoreConfig::default()),
    }
}

async fn run(cfg: CoreConfig) -> anyhow::Result<()> {
    let page = build_page(&cfg);
    let storefront = Rc::new(Storefront::mount(
        page.basket_list.clone(),
        page.item_template.clone(),
        cfg.view.clone(),
    )?);

    let fetch = match HttpCatalogClient::from_config(&cfg.catalog) {
        Ok(client) => {
            let storefront = Rc::clone(&storefront);
            Some(tokio::task::spawn_local(async move {
                storefront.load_catalog(&client).await
            }))
        }
        Err(e) => {
            log_error("catalog client", &e);
            None
        }
    };

    for action in &cfg.demo.actions {
        match action.kind() {
            EventKind::BasketAdd | EventKind::BasketRemove => {
                storefront.bus().publish(action.clone())
            }
            other => tracing::warn!(event = %other, "only ui intents can be replayed, skipping"),
        }
    }

    if let Some(fetch) = fetch {
        let loaded = fetch.await?;
        tracing::info!(loaded, products = storefront.catalog().len(), "catalog request finished");
    }

    let basket = storefront.basket();
    let view = storefront.basket_view();
    let rows: Vec<serde_json::Value> = basket
        .items()
        .iter()
        .filter_map(|id| {
            view.row(id.as_str()).map(|_| {
                let title = storefront
                    .catalog()
                    .get_product(id.as_str())
                    .map(|p| p.title)
                    .unwrap_or_default();
                serde_json::json!({
                    "id": id,
                    "title": title,
                    "quantity": basket.quantity(id.as_str()),
                })
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cfg = load_config()?;
    match cfg.demo.log_filter.as_deref() {
        Some(directives) => {
            init_logging_with(directives);
        }
        None => init_logging(),
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cfg))
}
