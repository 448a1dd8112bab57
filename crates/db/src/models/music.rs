//! Music tracks for the audio player playlist.
//!
//! Tracks are create/read only.

use bson::oid::ObjectId;
use bson::serde_helpers::{
    chrono_datetime_as_bson_datetime_optional, serialize_object_id_as_hex_string,
};
use petal_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, NewDocument};
use crate::seed;

/// A document from the `music` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicTrack {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Playable asset name, resolved by the static file host.
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Length in seconds as entered; never checked against the audio file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(
        default,
        deserialize_with = "chrono_datetime_as_bson_datetime_optional::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
}

/// DTO for creating a track. `title` and `filename` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMusicTrack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewDocument for CreateMusicTrack {
    const ENTITY: &'static str = MusicTrack::NAME;
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "filename"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt"];
}

impl Entity for MusicTrack {
    const COLLECTION: &'static str = "music";
    const NAME: &'static str = "Music track";

    type Create = CreateMusicTrack;

    fn sample_catalog() -> Vec<CreateMusicTrack> {
        seed::music_catalog()
    }
}
