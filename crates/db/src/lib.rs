//! Data-access layer: connection factory, entity models and repositories.

pub mod entity;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

use std::sync::Arc;

use error::DbError;
use store::Connector;

/// Open a session, ping the store and release the session again.
pub async fn health_check(connector: Arc<dyn Connector>) -> Result<(), DbError> {
    store::with_session(connector, |session| session.ping()).await
}
