//! Storage-specific error type wrapping sqlx errors.

use shoplist_domain::error::ShopListError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for ShopListError {
    fn from(err: StorageError) -> Self {
        Self::Connection(Box::new(err))
    }
}
