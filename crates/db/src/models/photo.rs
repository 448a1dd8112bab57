//! Photo gallery entries and their DTOs.

use bson::oid::ObjectId;
use bson::serde_helpers::{
    chrono_datetime_as_bson_datetime_optional, serialize_object_id_as_hex_string,
};
use bson::{doc, Document};
use petal_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Mutable, NewDocument};
use crate::seed;

/// A document from the `photos` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Gallery image filenames, in display order.
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    /// Hex color code, stored as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Display position; listings sort on it ascending. Not unique.
    #[serde(default)]
    pub order: i32,
    /// Absent on documents written outside this service.
    #[serde(
        default,
        deserialize_with = "chrono_datetime_as_bson_datetime_optional::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "chrono_datetime_as_bson_datetime_optional::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a photo entry. `title` and `category` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhoto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// DTO for updating a photo entry. All fields optional; the identifier
/// and `createdAt` cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl NewDocument for CreatePhoto {
    const ENTITY: &'static str = Photo::NAME;
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "category"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
}

impl Entity for Photo {
    const COLLECTION: &'static str = "photos";
    const NAME: &'static str = "Photo";

    type Create = CreatePhoto;

    fn listing_sort() -> Option<Document> {
        Some(doc! { "order": 1 })
    }

    fn sample_catalog() -> Vec<CreatePhoto> {
        seed::photo_catalog()
    }
}

impl Mutable for Photo {
    type Update = UpdatePhoto;

    const UPDATED_AT: &'static str = "updatedAt";
}
