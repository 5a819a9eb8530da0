//! In-memory repository implementation.
//!
//! Documents live in insertion order inside a `Vec` guarded by an async
//! `RwLock`. Suitable for development and tests; nothing survives a restart.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{Category, Document, DocumentId, Task};
use crate::infrastructure::{DocumentRepository, RepositoryFuture};

/// In-memory implementation of `DocumentRepository`.
///
/// Clones share the same storage.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTaskRepository::new();
/// let id = repository.insert_one(TaskFields::new("Report")).await?;
/// let found = repository.find_by_id(&id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryRepository<D> {
    documents: Arc<RwLock<Vec<D>>>,
}

/// In-memory `tasks` collection.
pub type InMemoryTaskRepository = InMemoryRepository<Task>;

/// In-memory `categories` collection.
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;

impl<D: Document> InMemoryRepository<D> {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Creates a collection pre-populated with `documents`.
    #[must_use]
    pub fn with_documents(documents: Vec<D>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }
}

impl<D: Document> Default for InMemoryRepository<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl<D: Document> DocumentRepository<D> for InMemoryRepository<D> {
    fn find_all(&self) -> RepositoryFuture<Vec<D>> {
        let documents = Arc::clone(&self.documents);
        async move { Ok(documents.read().await.clone()) }.boxed()
    }

    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<D>> {
        let documents = Arc::clone(&self.documents);
        let id = id.clone();
        async move {
            let guard = documents.read().await;
            Ok(guard.iter().find(|document| document.id() == &id).cloned())
        }
        .boxed()
    }

    fn insert_one(&self, fields: D::Fields) -> RepositoryFuture<DocumentId> {
        let documents = Arc::clone(&self.documents);
        async move {
            let id = DocumentId::generate();
            documents
                .write()
                .await
                .push(D::from_parts(id.clone(), fields));
            Ok(id)
        }
        .boxed()
    }

    fn update_by_id(&self, id: &DocumentId, fields: D::Fields) -> RepositoryFuture<bool> {
        let documents = Arc::clone(&self.documents);
        let id = id.clone();
        async move {
            let mut guard = documents.write().await;
            match guard.iter_mut().find(|document| document.id() == &id) {
                Some(document) => {
                    document.replace_fields(fields);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        .boxed()
    }

    fn delete_by_id(&self, id: &DocumentId) -> RepositoryFuture<bool> {
        let documents = Arc::clone(&self.documents);
        let id = id.clone();
        async move {
            let mut guard = documents.write().await;
            let before = guard.len();
            guard.retain(|document| document.id() != &id);
            Ok(guard.len() != before)
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
