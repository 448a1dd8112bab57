//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` entity struct matching the stored document
//! - A create DTO whose absent fields are not written
//! - An update DTO (all `Option` fields) where the entity supports updates

pub mod music;
pub mod photo;
