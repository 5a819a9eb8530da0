//! Persistence gateway traits.
//!
//! Every backend exposes the same five document-store operations per
//! collection. Methods return boxed `'static` futures so the trait stays
//! object-safe and handlers can hold `Arc<dyn DocumentRepository<_>>`.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Category, Document, DocumentId, Task};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No document matches the identifier.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The backend rejected or failed the operation.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing backing files failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl RepositoryError {
    /// Creates a `NotFound` error for a document of type `D`.
    #[must_use]
    pub fn not_found<D: Document>(id: &DocumentId) -> Self {
        Self::NotFound {
            kind: D::KIND,
            id: id.to_string(),
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

// =============================================================================
// Document Repository
// =============================================================================

/// Future returned by every repository operation.
///
/// Calling a repository method only describes the operation. Nothing touches
/// the backend until the future is polled, and dropping it unpolled leaves
/// the collection unchanged.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

/// Gateway to one collection of the document store.
///
/// No operation spans more than one document, and none retries.
/// Implementations capture their arguments eagerly and do all backend work
/// inside the returned [`RepositoryFuture`].
pub trait DocumentRepository<D: Document>: Send + Sync {
    /// Returns every document in the collection. Order is not guaranteed.
    fn find_all(&self) -> RepositoryFuture<Vec<D>>;

    /// Finds a document by its identifier.
    ///
    /// Returns `Ok(None)` when nothing matches, including when the identifier
    /// is not in the backend's native format.
    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<D>>;

    /// Inserts a new document and returns its generated identifier.
    fn insert_one(&self, fields: D::Fields) -> RepositoryFuture<DocumentId>;

    /// Replaces the fields of the matching document.
    ///
    /// Returns `Ok(true)` if a document matched, `Ok(false)` otherwise.
    fn update_by_id(&self, id: &DocumentId, fields: D::Fields) -> RepositoryFuture<bool>;

    /// Deletes a document by its identifier.
    ///
    /// Returns `Ok(true)` if the document was deleted, `Ok(false)` if it didn't exist.
    fn delete_by_id(&self, id: &DocumentId) -> RepositoryFuture<bool>;
}

/// Gateway to the `tasks` collection.
pub type TaskRepository = dyn DocumentRepository<Task>;

/// Gateway to the `categories` collection.
pub type CategoryRepository = dyn DocumentRepository<Category>;

// =============================================================================
// Tests
// =============================================================================
