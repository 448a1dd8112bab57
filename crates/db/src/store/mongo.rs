//! MongoDB-backed connector.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, Tls};
use mongodb::{Client, Database};

use super::{Connector, Session};
use crate::error::DbError;

/// Everything needed to open a MongoDB session.
#[derive(Debug, Clone)]
pub struct MongoSettings {
    /// Connection string, already unwrapped from any platform-specific format.
    pub uri: String,
    /// Database holding the `photos` and `music` collections.
    pub database: String,
    /// Applied to connect, server selection and every individual operation.
    pub timeout: Duration,
}

/// Opens a brand-new [`Client`] for every session.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    settings: MongoSettings,
}

impl MongoConnector {
    pub fn new(settings: MongoSettings) -> Self {
        Self { settings }
    }

    async fn client_options(&self) -> Result<ClientOptions, DbError> {
        let mut options = ClientOptions::parse(&self.settings.uri)
            .await
            .map_err(|e| DbError::Connection(format!("invalid connection string: {e}")))?;

        options.connect_timeout = Some(self.settings.timeout);
        options.server_selection_timeout = Some(self.settings.timeout);
        options.app_name = Some("petal".to_string());

        // Hosted clusters front TLS with certificates we do not manage.
        if let Some(Tls::Enabled(tls)) = options.tls.as_mut() {
            tls.allow_invalid_certificates = Some(true);
        }

        Ok(options)
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self) -> Result<Box<dyn Session>, DbError> {
        let options = self.client_options().await?;
        let client =
            Client::with_options(options).map_err(|e| DbError::Connection(e.to_string()))?;

        let session = MongoSession {
            db: client.database(&self.settings.database),
            client,
            timeout: self.settings.timeout,
        };

        // A failed ping must still release the client before reporting.
        if let Err(err) = session.ping().await {
            session.close().await;
            return Err(match err {
                DbError::Connection(msg) => DbError::Connection(msg),
                other => DbError::Connection(other.to_string()),
            });
        }

        Ok(Box::new(session))
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

struct MongoSession {
    client: Client,
    db: Database,
    timeout: Duration,
}

impl MongoSession {
    /// Bound `fut` by the configured timeout. The driver has no socket
    /// timeout of its own, so this is what keeps a stalled query finite.
    async fn timed<T, F>(&self, operation: &str, fut: F) -> Result<T, DbError>
    where
        F: Future<Output = mongodb::error::Result<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => Err(DbError::Connection(format!(
                "{operation} timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl Session for MongoSession {
    async fn ping(&self) -> Result<(), DbError> {
        self.timed("ping", async {
            self.db.run_command(doc! { "ping": 1 }).await.map(|_| ())
        })
        .await
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, DbError> {
        let coll = self.collection(collection);
        self.timed("find", async move {
            let mut action = coll.find(filter);
            if let Some(sort) = sort {
                action = action.sort(sort);
            }
            let cursor = action.await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DbError> {
        let coll = self.collection(collection);
        self.timed("find_one", async move { coll.find_one(filter).await })
            .await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, DbError> {
        let coll = self.collection(collection);
        let result = self
            .timed("insert_one", async move { coll.insert_one(document).await })
            .await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            DbError::DataAccess(format!(
                "store returned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<u64, DbError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let coll = self.collection(collection);
        let result = self
            .timed("insert_many", async move { coll.insert_many(documents).await })
            .await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<u64, DbError> {
        let coll = self.collection(collection);
        let result = self
            .timed("update_one", async move {
                coll.update_one(filter, doc! { "$set": set }).await
            })
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DbError> {
        let coll = self.collection(collection);
        let result = self
            .timed("delete_one", async move { coll.delete_one(filter).await })
            .await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, collection: &str) -> Result<u64, DbError> {
        let coll = self.collection(collection);
        self.timed("count", async move { coll.count_documents(doc! {}).await })
            .await
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
