use crate::error::{CoreError, CoreResult};
use crate::events::StoreEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    pub catalog: CatalogConfig,
    pub view: ViewConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Selectors of the named slots inside a basket row template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub item_title: String,
    pub item_add: String,
    pub item_remove: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    pub log_filter: Option<String>,
    pub actions: Vec<StoreEvent>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            item_title: ".basket-item__title".to_string(),
            item_add: ".basket-item__add".to_string(),
            item_remove: ".basket-item__remove".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_FETCH_TIMEOUT_MS))
    }
}

impl CoreConfig {
    pub fn load(path: &Path) -> CoreResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_json(data: &str) -> CoreResult<Self> {
        serde_json::from_str(data).map_err(|e| CoreError::Config(e.to_string()))
    }
}
