//! Error types shared by the storage and domain layers.

use std::path::PathBuf;

/// Boxed source error carried by storage failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type StorageResult<T> = Result<T, StorageError>;

/// Everything that can go wrong between a caller and a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend choice could not be determined
    #[error("unable to load storage configuration from {}", path.display())]
    ConfigurationLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The backend was reachable but the operation failed
    #[error("{context}")]
    DataAccess {
        context: String,
        #[source]
        source: BoxError,
    },

    /// A record's shape or numeric field is invalid
    #[error("malformed record '{record}': {reason}")]
    MalformedRecord { record: String, reason: String },

    /// The selected backend cannot perform this operation
    #[error("{operation} is not supported by the {backend} {entity} store")]
    UnsupportedOperation {
        operation: &'static str,
        entity: &'static str,
        backend: &'static str,
    },
}

impl StorageError {
    pub fn data_access(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::DataAccess {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// Failures surfaced by the availability service
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("no user found with id '{user_id}'")]
    UserNotFound { user_id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
