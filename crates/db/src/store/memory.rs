//! In-process connector with the same observable semantics as the MongoDB
//! backend for the operations the repositories use.
//!
//! Selected with `STORE_BACKEND=memory` for running the service without a
//! database, and used by the test suites. It keeps count of opened and
//! closed sessions and can be told to fail, which is how the
//! release-on-every-path guarantee is exercised. Latency can be injected
//! as well, for exercising timeouts.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use tokio::sync::Mutex;

use super::{Connector, Session};
use crate::error::DbError;

#[derive(Default)]
struct MemoryInner {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    fail_connect: AtomicBool,
    fail_queries: AtomicBool,
    connect_delay_ms: AtomicU64,
    query_delay_ms: AtomicU64,
}

impl MemoryInner {
    async fn pause(delay_ms: &AtomicU64) {
        let ms = delay_ms.load(AtomicOrdering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Cheaply cloneable handle to a shared in-memory store.
#[derive(Clone, Default)]
pub struct MemoryConnector {
    inner: Arc<MemoryInner>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions handed out so far.
    pub fn opened(&self) -> usize {
        self.inner.opened.load(AtomicOrdering::SeqCst)
    }

    /// Number of sessions closed so far.
    pub fn closed(&self) -> usize {
        self.inner.closed.load(AtomicOrdering::SeqCst)
    }

    /// Sessions opened but not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.opened().saturating_sub(self.closed())
    }

    /// Make subsequent `connect` calls fail with [`DbError::Connection`].
    pub fn fail_connections(&self, fail: bool) {
        self.inner.fail_connect.store(fail, AtomicOrdering::SeqCst);
    }

    /// Make subsequent queries fail with [`DbError::DataAccess`].
    pub fn fail_queries(&self, fail: bool) {
        self.inner.fail_queries.store(fail, AtomicOrdering::SeqCst);
    }

    /// Make every `connect` call wait `delay` before answering.
    pub fn delay_connections(&self, delay: Duration) {
        self.inner
            .connect_delay_ms
            .store(delay.as_millis() as u64, AtomicOrdering::SeqCst);
    }

    /// Make every query wait `delay` before touching the data.
    pub fn delay_queries(&self, delay: Duration) {
        self.inner
            .query_delay_ms
            .store(delay.as_millis() as u64, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self) -> Result<Box<dyn Session>, DbError> {
        MemoryInner::pause(&self.inner.connect_delay_ms).await;
        if self.inner.fail_connect.load(AtomicOrdering::SeqCst) {
            return Err(DbError::Connection("memory store refused connection".into()));
        }
        self.inner.opened.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(Box::new(MemorySession {
            inner: Arc::clone(&self.inner),
            closed: AtomicBool::new(false),
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

struct MemorySession {
    inner: Arc<MemoryInner>,
    closed: AtomicBool,
}

impl MemorySession {
    async fn check(&self) -> Result<(), DbError> {
        MemoryInner::pause(&self.inner.query_delay_ms).await;
        if self.closed.load(AtomicOrdering::SeqCst) {
            return Err(DbError::Connection("session already closed".into()));
        }
        if self.inner.fail_queries.load(AtomicOrdering::SeqCst) {
            return Err(DbError::DataAccess("memory store query failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn ping(&self) -> Result<(), DbError> {
        if self.closed.load(AtomicOrdering::SeqCst) {
            return Err(DbError::Connection("session already closed".into()));
        }
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, DbError> {
        self.check().await?;
        let collections = self.inner.collections.lock().await;
        let mut found: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default();
        if let Some(sort) = sort {
            sort_documents(&mut found, &sort);
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DbError> {
        self.check().await?;
        let collections = self.inner.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, DbError> {
        self.check().await?;
        let (id, stored) = assign_id(document);
        let mut collections = self.inner.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<u64, DbError> {
        self.check().await?;
        let count = documents.len() as u64;
        let mut collections = self.inner.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        docs.extend(documents.into_iter().map(|d| assign_id(d).1));
        Ok(count)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<u64, DbError> {
        self.check().await?;
        let mut collections = self.inner.collections.lock().await;
        let Some(target) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(0);
        };
        for (key, value) in set {
            if key != "_id" {
                target.insert(key, value);
            }
        }
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DbError> {
        self.check().await?;
        let mut collections = self.inner.collections.lock().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, collection: &str) -> Result<u64, DbError> {
        self.check().await?;
        let collections = self.inner.collections.lock().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn close(&self) {
        if !self.closed.swap(true, AtomicOrdering::SeqCst) {
            self.inner.closed.fetch_add(1, AtomicOrdering::SeqCst);
        }
    }
}

/// Give `document` an `_id` (keeping a caller-supplied ObjectId) and move
/// it to the front, as the server does.
fn assign_id(mut document: Document) -> (ObjectId, Document) {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(id)) => id,
        _ => ObjectId::new(),
    };
    let mut stored = doc! { "_id": id };
    for (key, value) in document {
        stored.insert(key, value);
    }
    (id, stored)
}

/// Top-level equality match on every filter key.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// Stable sort on the first key of `sort`; missing and null values order first.
fn sort_documents(documents: &mut [Document], sort: &Document) {
    let Some((key, direction)) = sort.iter().next() else {
        return;
    };
    let descending = as_number(direction).is_some_and(|d| d < 0.0);

    documents.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let a = a.filter(|v| !matches!(v, Bson::Null));
    let b = b.filter(|v| !matches!(v, Bson::Null));
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a, b) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_every_filter_key() {
        let d = doc! { "category": "roses", "order": 1 };
        assert!(matches(&d, &doc! {}));
        assert!(matches(&d, &doc! { "category": "roses" }));
        assert!(!matches(&d, &doc! { "category": "urban" }));
        assert!(!matches(&d, &doc! { "category": "roses", "order": 2 }));
    }

    #[test]
    fn sort_ascending_mixes_integer_widths() {
        let mut docs = vec![
            doc! { "n": "c", "order": 3_i64 },
            doc! { "n": "a", "order": 1_i32 },
            doc! { "n": "none" },
            doc! { "n": "b", "order": 2.0 },
        ];
        sort_documents(&mut docs, &doc! { "order": 1 });
        let names: Vec<_> = docs.iter().map(|d| d.get_str("n").unwrap()).collect();
        assert_eq!(names, vec!["none", "a", "b", "c"]);
    }

    #[test]
    fn sort_descending() {
        let mut docs = vec![doc! { "order": 1 }, doc! { "order": 5 }, doc! { "order": 3 }];
        sort_documents(&mut docs, &doc! { "order": -1 });
        let orders: Vec<_> = docs.iter().map(|d| d.get_i32("order").unwrap()).collect();
        assert_eq!(orders, vec![5, 3, 1]);
    }

    #[test]
    fn assign_id_puts_id_first_and_keeps_existing() {
        let existing = ObjectId::new();
        let (id, stored) = assign_id(doc! { "title": "x", "_id": existing });
        assert_eq!(id, existing);
        assert_eq!(stored.keys().next().map(String::as_str), Some("_id"));

        let (fresh, stored) = assign_id(doc! { "title": "y" });
        assert_eq!(stored.get_object_id("_id").unwrap(), fresh);
    }

    #[tokio::test]
    async fn close_is_counted_once() {
        let connector = MemoryConnector::new();
        let session = connector.connect().await.unwrap();
        session.close().await;
        session.close().await;
        assert_eq!(connector.opened(), 1);
        assert_eq!(connector.closed(), 1);
        assert!(session.count("photos").await.is_err());
    }
}
