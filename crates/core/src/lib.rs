//! Domain primitives shared across the petal workspace.
//!
//! Holds the error taxonomy, common type aliases and the shallow
//! required-field validation applied to incoming documents.

pub mod error;
pub mod types;
pub mod validation;
