//! Host execution context and the shared services behind it.
//!
//! A [`HostContext`] is what a screen hands to the views it creates: the
//! platform version, the active [`Configuration`] and the application-wide
//! [`Services`]. Views keep the context only weakly; loaders keep only the
//! `Arc<Services>`, so neither prolongs the life of the screen.

use std::fmt;
use std::sync::Arc;

use mdview_core::{AssetStore, MarkupConverter, MdviewConfig, Result, UiHandle, WorkerPool};

use crate::assets::DirAssetStore;
use crate::markdown::CommonMarkConverter;

/// Display configuration a context was created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Locale override, e.g. `"en-GB"`.
    pub locale: Option<String>,
    /// Night-mode override; `None` follows the system.
    pub night_mode: Option<bool>,
}

/// Application-wide collaborators shared by every load.
#[derive(Clone)]
pub struct Services {
    assets: Arc<dyn AssetStore>,
    converter: Arc<dyn MarkupConverter>,
    pool: Arc<WorkerPool>,
    ui: UiHandle,
}

impl Services {
    /// Bundle explicit collaborators.
    pub fn new(
        assets: impl AssetStore,
        converter: impl MarkupConverter,
        pool: Arc<WorkerPool>,
        ui: UiHandle,
    ) -> Self {
        Self {
            assets: Arc::new(assets),
            converter: Arc::new(converter),
            pool,
            ui,
        }
    }

    /// Wire the default stack from configuration: a [`DirAssetStore`] at the
    /// configured root, a [`CommonMarkConverter`] and a fresh, unstarted
    /// [`WorkerPool`].
    pub fn from_config(config: &MdviewConfig, ui: UiHandle) -> Result<Self> {
        Ok(Self::new(
            DirAssetStore::from_config(config)?,
            CommonMarkConverter::new(),
            Arc::new(WorkerPool::new(config.pool.clone())),
            ui,
        ))
    }

    /// The asset store.
    pub fn assets(&self) -> &Arc<dyn AssetStore> {
        &self.assets
    }

    /// The markup converter.
    pub fn converter(&self) -> &Arc<dyn MarkupConverter> {
        &self.converter
    }

    /// The shared worker pool.
    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Handle onto the UI queue.
    pub fn ui(&self) -> &UiHandle {
        &self.ui
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("pool", &self.pool)
            .field("ui_closed", &self.ui.is_closed())
            .finish_non_exhaustive()
    }
}

/// The execution context a view is created in.
#[derive(Debug, Clone)]
pub struct HostContext {
    platform_version: u32,
    configuration: Configuration,
    services: Arc<Services>,
}

impl HostContext {
    /// Create a context with the default configuration.
    pub fn new(platform_version: u32, services: Arc<Services>) -> Self {
        Self {
            platform_version,
            configuration: Configuration::default(),
            services,
        }
    }

    /// Replace the configuration.
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Derive a new context sharing platform and services but carrying
    /// `configuration`.
    pub fn create_configuration_context(&self, configuration: Configuration) -> Self {
        Self {
            platform_version: self.platform_version,
            configuration,
            services: Arc::clone(&self.services),
        }
    }

    /// Platform API version the host runs on.
    pub fn platform_version(&self) -> u32 {
        self.platform_version
    }

    /// Active configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Application-wide services.
    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }
}
