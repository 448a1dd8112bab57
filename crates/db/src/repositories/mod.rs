//! Repository layer.
//!
//! One generic [`DocumentRepo`] parameterised by entity; the aliases below
//! name the concrete repositories the API uses.

pub mod document_repo;

pub use document_repo::{DocumentRepo, SessionFuture};

use crate::models::music::MusicTrack;
use crate::models::photo::Photo;

/// Photo gallery repository (list, get, create, update, delete, seed).
pub type PhotoRepo = DocumentRepo<Photo>;

/// Music repository (list, get, create, seed).
pub type MusicRepo = DocumentRepo<MusicTrack>;
