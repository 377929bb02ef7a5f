//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::menu::MenuRegistry;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Static menu tree, filtered per request.
    menus: MenuRegistry,
}

impl AppState {
    /// Load the menu named by the config, or the built-in one.
    pub fn new(config: &Config) -> Result<Self> {
        let menus = match &config.menu_config {
            Some(path) => MenuRegistry::from_path(path)
                .with_context(|| format!("failed to load menu config {}", path.display()))?,
            None => MenuRegistry::builtin().context("failed to load built-in menu")?,
        };

        info!(
            items = menus.len(),
            source = %config
                .menu_config
                .as_ref()
                .map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
            "menu ready"
        );

        Ok(Self::with_menus(menus))
    }

    /// Build state around an existing registry.
    pub fn with_menus(menus: MenuRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner { menus }),
        }
    }

    pub fn menus(&self) -> &MenuRegistry {
        &self.inner.menus
    }
}
