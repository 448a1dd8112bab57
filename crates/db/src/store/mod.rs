//! Connection factory seam.
//!
//! A [`Connector`] opens one short-lived [`Session`] per repository
//! operation. Nothing is pooled or shared between calls. [`with_session`]
//! owns the session for the duration of a single operation and closes it
//! on every exit path, including cancellation of the caller and a panic
//! inside the operation.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;
use futures::future::BoxFuture;

use crate::error::DbError;

pub use memory::MemoryConnector;
pub use mongo::{MongoConnector, MongoSettings};

/// Opens fresh sessions against a document store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a new session. The returned session has already answered a ping.
    async fn connect(&self) -> Result<Box<dyn Session>, DbError>;

    /// Short backend name used in logs (`mongodb`, `memory`).
    fn backend(&self) -> &'static str;
}

/// A single open connection to the store.
///
/// Filters are top-level equality matches, `sort` names a single field
/// with `1` (ascending) or `-1` (descending), and updates merge the given
/// fields into the matched document without ever inserting.
#[async_trait]
pub trait Session: Send + Sync {
    async fn ping(&self) -> Result<(), DbError>;

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, DbError>;

    async fn find_one(&self, collection: &str, filter: Document)
        -> Result<Option<Document>, DbError>;

    /// Insert one document, returning the identifier the store assigned.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, DbError>;

    /// Insert a batch, returning how many documents were written.
    async fn insert_many(&self, collection: &str, documents: Vec<Document>)
        -> Result<u64, DbError>;

    /// Merge `set` into the first document matching `filter`.
    ///
    /// Returns the matched count (0 or 1).
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<u64, DbError>;

    /// Delete the first document matching `filter`, returning the deleted count.
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DbError>;

    async fn count(&self, collection: &str) -> Result<u64, DbError>;

    /// Release the underlying connection. Safe to call more than once.
    async fn close(&self);
}

/// Future returned by the operation handed to [`with_session`].
pub type SessionFuture<'s, T> = BoxFuture<'s, Result<T, DbError>>;

/// Open a session, run `f` on it and close it again.
///
/// The work runs on its own task, so dropping the returned future (a
/// client disconnect, a request timeout) does not abort the in-flight
/// operation; it still completes and releases its session. A panic in
/// `f` is reported as [`DbError::DataAccess`] and the session is closed
/// by a release guard.
pub async fn with_session<T, F>(connector: Arc<dyn Connector>, f: F) -> Result<T, DbError>
where
    T: Send + 'static,
    F: for<'s> FnOnce(&'s dyn Session) -> SessionFuture<'s, T> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let guard = SessionGuard::new(connector.connect().await?);
        let result = f(guard.session()).await;
        guard.close().await;
        result
    });

    task.await
        .map_err(|e| DbError::DataAccess(format!("session task failed: {e}")))?
}

/// Closes its session when dropped without an explicit [`close`](Self::close).
struct SessionGuard {
    session: Arc<dyn Session>,
    open: bool,
}

impl SessionGuard {
    fn new(session: Box<dyn Session>) -> Self {
        Self {
            session: Arc::from(session),
            open: true,
        }
    }

    fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    async fn close(mut self) {
        self.session.close().await;
        self.open = false;
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let session = Arc::clone(&self.session);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { session.close().await });
            }
            Err(_) => tracing::warn!("No runtime to close an abandoned session"),
        }
    }
}
