//! Per-entity configuration consumed by the generic
//! [`DocumentRepo`](crate::repositories::DocumentRepo).
//!
//! An entity names its collection, how listings are ordered, what a new
//! document must contain and which sample documents seed an empty
//! collection. Update and delete are opt-in through [`Mutable`].

use bson::Document;
use petal_core::error::CoreError;
use petal_core::types::Timestamp;
use petal_core::validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DbError;

/// A document type stored in its own collection.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the store.
    const COLLECTION: &'static str;
    /// Human-readable name used in errors and logs.
    const NAME: &'static str;

    /// Payload accepted by `create`.
    type Create: NewDocument;

    /// Ordering applied by `find_all`; `None` keeps natural storage order.
    fn listing_sort() -> Option<Document> {
        None
    }

    /// Documents inserted by `seed_sample_data` when the collection is empty.
    fn sample_catalog() -> Vec<Self::Create>;
}

/// Entities that may be partially updated and hard-deleted.
pub trait Mutable: Entity {
    /// Partial payload accepted by `update`; absent fields are left untouched.
    type Update: Serialize + Send + Sync;

    /// Field refreshed on every update.
    const UPDATED_AT: &'static str;
}

/// A create payload.
pub trait NewDocument: Serialize + Send + Sync {
    /// Entity name reported by validation errors.
    const ENTITY: &'static str;
    /// Fields that must be present and non-empty.
    const REQUIRED_FIELDS: &'static [&'static str];
    /// Fields stamped with the creation time.
    const TIMESTAMP_FIELDS: &'static [&'static str];

    /// Check that every required field is present.
    fn validate(&self) -> Result<(), CoreError> {
        let value =
            serde_json::to_value(self).map_err(|e| CoreError::Internal(e.to_string()))?;
        validation::require_fields(Self::ENTITY, &value, Self::REQUIRED_FIELDS)
    }

    /// Convert into a storable document stamped with `now`.
    ///
    /// Absent optional fields are omitted rather than stored as null.
    fn to_document(&self, now: Timestamp) -> Result<Document, DbError> {
        let mut document = bson::to_document(self)?;
        let stamp = bson::DateTime::from_chrono(now);
        for field in Self::TIMESTAMP_FIELDS {
            document.insert(*field, stamp);
        }
        Ok(document)
    }
}
