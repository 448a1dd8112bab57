use mongodb::error::ErrorKind;
use petal_core::error::CoreError;

/// Failures raised by the data-access layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store is unreachable, rejected our credentials or timed out.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The supplied identifier is not a well-formed ObjectId.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Any other failure while executing a query or decoding its result.
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Authentication { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::InvalidTlsConfig { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => DbError::Connection(err.to_string()),
            _ => DbError::DataAccess(err.to_string()),
        }
    }
}

impl From<bson::de::Error> for DbError {
    fn from(err: bson::de::Error) -> Self {
        DbError::DataAccess(format!("failed to decode document: {err}"))
    }
}

impl From<bson::ser::Error> for DbError {
    fn from(err: bson::ser::Error) -> Self {
        DbError::DataAccess(format!("failed to encode document: {err}"))
    }
}
