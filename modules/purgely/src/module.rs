//! Module declaration and lifecycle

use crate::config::Config;
use crate::contract::PurgelyApi;
use crate::domain::{PurgeBackend, Service};
use crate::infra::fastly::FastlyClient;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Purgely module: owns the resolved configuration and the domain service
pub struct PurgelyModule {
    config: RwLock<Arc<Config>>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for PurgelyModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Arc::new(Config::default())),
            service: RwLock::new(None),
        }
    }
}

impl PurgelyModule {
    /// Initialize with the Fastly backend
    pub fn init(&self, config: Config) -> Result<()> {
        let backend = Arc::new(FastlyClient::new(&config)?);
        self.init_with_backend(config, backend);
        Ok(())
    }

    /// Initialize with a caller-provided backend
    pub fn init_with_backend(&self, config: Config, backend: Arc<dyn PurgeBackend>) {
        if !config.is_configured() {
            tracing::warn!("Fastly API key or service ID missing; only URL purges will succeed");
        }

        let config = Arc::new(config);
        *self.config.write() = config.clone();

        let service = Arc::new(Service::new(config, backend));
        *self.service.write() = Some(service);

        tracing::info!("Purgely module initialized");
    }

    /// Resolved configuration
    pub fn config(&self) -> Arc<Config> {
        self.config.read().clone()
    }

    /// Domain service
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for embedding code
    pub fn client(&self) -> Result<Arc<dyn PurgelyApi>> {
        let client = crate::api::native::NativeClient::new(self.service()?);
        Ok(Arc::new(client))
    }

    /// Register REST routes on the given router
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        tracing::info!("Registering purgely REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
