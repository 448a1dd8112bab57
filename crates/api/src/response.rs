//! Shared response bodies for write endpoints.
//!
//! Reads return the document (or array of documents) directly; writes
//! acknowledge with `{ "success": true }`, plus the new `id` on create.

use bson::oid::ObjectId;
use serde::Serialize;

/// `{ "success": true }` acknowledgement for update and delete.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": true, "id": "<hex>" }` returned with `201 Created`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: String,
}

impl CreatedResponse {
    pub fn new(id: ObjectId) -> Self {
        Self {
            success: true,
            id: id.to_hex(),
        }
    }
}
