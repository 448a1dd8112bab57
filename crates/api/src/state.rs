use std::sync::Arc;
use std::time::Duration;

use petal_db::repositories::{MusicRepo, PhotoRepo};
use petal_db::store::{Connector, MemoryConnector, MongoConnector, MongoSettings};

use crate::config::{DatabaseConfig, ServerConfig, StoreBackend};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). There is no
/// long-lived database handle: the repositories hold a connector and open
/// a fresh session per operation.
#[derive(Clone)]
pub struct AppState {
    /// Connection factory shared by the repositories and the health check.
    pub connector: Arc<dyn Connector>,
    pub photos: PhotoRepo,
    pub music: MusicRepo,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(connector: Arc<dyn Connector>, config: ServerConfig) -> Self {
        Self {
            photos: PhotoRepo::new(Arc::clone(&connector)),
            music: MusicRepo::new(Arc::clone(&connector)),
            connector,
            config: Arc::new(config),
        }
    }
}

/// Build the connector selected by `STORE_BACKEND`.
pub fn build_connector(config: &DatabaseConfig) -> Arc<dyn Connector> {
    match config.backend {
        StoreBackend::Mongo => Arc::new(MongoConnector::new(MongoSettings {
            uri: config.uri.clone(),
            database: config.name.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })),
        StoreBackend::Memory => Arc::new(MemoryConnector::new()),
    }
}
