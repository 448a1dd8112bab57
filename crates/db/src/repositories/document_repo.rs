//! Generic repository over one entity's collection.

use std::marker::PhantomData;
use std::sync::Arc;

use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::Utc;

use crate::entity::{Entity, Mutable, NewDocument};
use crate::error::DbError;
pub use crate::store::SessionFuture;
use crate::store::{self, Connector, Session};

/// CRUD operations for the collection owned by `E`.
///
/// Every operation opens its own session through the connector and
/// closes it before returning, whatever the outcome.
pub struct DocumentRepo<E> {
    connector: Arc<dyn Connector>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for DocumentRepo<E> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> DocumentRepo<E> {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            _entity: PhantomData,
        }
    }

    /// Acquire a session, run `f` on it, then close it.
    ///
    /// The session is closed on success, failure, panic and cancellation
    /// alike (see [`store::with_session`]), and any failure is logged with
    /// the operation, collection and identifier before being returned.
    pub async fn scoped<T, F>(
        &self,
        operation: &'static str,
        id: Option<&str>,
        f: F,
    ) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: for<'s> FnOnce(&'s dyn Session) -> SessionFuture<'s, T> + Send + 'static,
    {
        let result = store::with_session(Arc::clone(&self.connector), f).await;

        if let Err(err) = &result {
            tracing::error!(
                operation,
                collection = E::COLLECTION,
                id = id.unwrap_or("-"),
                backend = self.connector.backend(),
                error = %err,
                "Document operation failed",
            );
        }
        result
    }

    fn parse_id(operation: &'static str, id: &str) -> Result<ObjectId, DbError> {
        ObjectId::parse_str(id).map_err(|_| {
            tracing::warn!(
                operation,
                collection = E::COLLECTION,
                id,
                "Rejected malformed identifier"
            );
            DbError::InvalidId(id.to_string())
        })
    }

    /// List every document, optionally restricted to one category.
    ///
    /// An empty or absent category means no filter.
    pub async fn find_all(&self, category: Option<&str>) -> Result<Vec<E>, DbError> {
        let filter = match category.filter(|c| !c.is_empty()) {
            Some(category) => doc! { "category": category },
            None => Document::new(),
        };

        self.scoped("find_all", None, move |session| {
            Box::pin(async move {
                let documents = session
                    .find(E::COLLECTION, filter, E::listing_sort())
                    .await?;
                documents
                    .into_iter()
                    .map(|d| bson::from_document::<E>(d).map_err(DbError::from))
                    .collect::<Result<Vec<E>, DbError>>()
            })
        })
        .await
    }

    /// Find one document. `Ok(None)` means the identifier is well-formed
    /// but matches nothing.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<E>, DbError> {
        let oid = Self::parse_id("find_by_id", id)?;

        self.scoped("find_by_id", Some(id), move |session| {
            Box::pin(async move {
                let found = session.find_one(E::COLLECTION, doc! { "_id": oid }).await?;
                found
                    .map(bson::from_document::<E>)
                    .transpose()
                    .map_err(DbError::from)
            })
        })
        .await
    }

    /// Insert a new document stamped with the current time, returning the
    /// identifier assigned by the store.
    pub async fn create(&self, input: &E::Create) -> Result<ObjectId, DbError> {
        let document = input.to_document(Utc::now())?;

        self.scoped("create", None, move |session| {
            Box::pin(async move { session.insert_one(E::COLLECTION, document).await })
        })
        .await
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        self.scoped("count", None, move |session| {
            Box::pin(async move { session.count(E::COLLECTION).await })
        })
        .await
    }

    /// Insert the entity's sample catalog if the collection is empty.
    ///
    /// Returns the number of documents inserted, which is zero whenever the
    /// collection already held data.
    pub async fn seed_sample_data(&self) -> Result<u64, DbError> {
        let now = Utc::now();
        let documents = E::sample_catalog()
            .iter()
            .map(|entry| entry.to_document(now))
            .collect::<Result<Vec<Document>, DbError>>()?;

        let inserted = self
            .scoped("seed_sample_data", None, move |session| {
                Box::pin(async move {
                    if session.count(E::COLLECTION).await? > 0 {
                        return Ok(0);
                    }
                    session.insert_many(E::COLLECTION, documents).await
                })
            })
            .await?;

        if inserted > 0 {
            tracing::info!(collection = E::COLLECTION, inserted, "Seeded sample data");
        } else {
            tracing::debug!(
                collection = E::COLLECTION,
                "Collection already populated, skipping seed"
            );
        }
        Ok(inserted)
    }
}

impl<E: Mutable> DocumentRepo<E> {
    /// Merge the supplied fields into an existing document and refresh its
    /// update timestamp. Never inserts.
    ///
    /// Returns the matched count: `0` means no document has this identifier.
    pub async fn update(&self, id: &str, input: &E::Update) -> Result<u64, DbError> {
        let oid = Self::parse_id("update", id)?;
        let mut set = bson::to_document(input)?;
        set.remove("_id");
        set.insert(E::UPDATED_AT, bson::DateTime::from_chrono(Utc::now()));

        self.scoped("update", Some(id), move |session| {
            Box::pin(async move {
                session
                    .update_one(E::COLLECTION, doc! { "_id": oid }, set)
                    .await
            })
        })
        .await
    }

    /// Hard-delete a document. Returns the deleted count (`0` or `1`).
    pub async fn delete(&self, id: &str) -> Result<u64, DbError> {
        let oid = Self::parse_id("delete", id)?;

        self.scoped("delete", Some(id), move |session| {
            Box::pin(async move { session.delete_one(E::COLLECTION, doc! { "_id": oid }).await })
        })
        .await
    }
}
