//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?category=` filter accepted by the list endpoints. Absent or empty
/// means every document.
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}
