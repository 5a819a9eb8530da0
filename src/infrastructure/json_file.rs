//! JSON file repository implementation.
//!
//! Each collection is one pretty-printed JSON array on disk
//! (`<directory>/<collection>.json`). The file is read once when the
//! repository is opened and rewritten after every successful write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{Category, Document, DocumentId, Task};
use crate::infrastructure::{DocumentRepository, RepositoryError, RepositoryFuture};

/// File-backed implementation of `DocumentRepository`.
///
/// Writers work on a copy of the collection and only swap it in once the
/// file has been replaced, so a failed write leaves memory and disk in
/// agreement.
#[derive(Debug, Clone)]
pub struct JsonFileRepository<D> {
    path: Arc<PathBuf>,
    documents: Arc<RwLock<Vec<D>>>,
}

/// File-backed `tasks` collection.
pub type JsonFileTaskRepository = JsonFileRepository<Task>;

/// File-backed `categories` collection.
pub type JsonFileCategoryRepository = JsonFileRepository<Category>;

impl<D: Document> JsonFileRepository<D> {
    /// Opens the collection file under `directory`, creating the directory
    /// if needed. A missing file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IoError` if the directory or file cannot be
    /// read, or `RepositoryError::SerializationError` if the file is not a
    /// valid collection.
    pub async fn open(directory: &Path) -> Result<Self, RepositoryError> {
        tokio::fs::create_dir_all(directory).await?;
        let path = directory.join(format!("{}.json", D::COLLECTION));

        let documents: Vec<D> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(error) if error.kind() == ErrorKind::NotFound => Vec::new(),
            Err(error) => return Err(error.into()),
        };

        tracing::debug!(
            collection = D::COLLECTION,
            path = %path.display(),
            documents = documents.len(),
            "Opened JSON collection"
        );

        Ok(Self {
            path: Arc::new(path),
            documents: Arc::new(RwLock::new(documents)),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `documents` next to `path` and renames the temp file over it.
async fn persist<D: Document>(path: &Path, documents: &[D]) -> Result<(), RepositoryError> {
    let temporary = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(documents)?;
    tokio::fs::write(&temporary, data).await?;
    tokio::fs::rename(&temporary, path).await?;
    Ok(())
}

#[allow(clippy::significant_drop_tightening)]
impl<D: Document> DocumentRepository<D> for JsonFileRepository<D> {
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
        let path = Arc::clone(&self.path);
        async move {
            let mut guard = documents.write().await;
            let id = DocumentId::generate();
            let mut next = guard.clone();
            next.push(D::from_parts(id.clone(), fields));
            persist(&path, &next).await?;
            *guard = next;
            Ok(id)
        }
        .boxed()
    }

    fn update_by_id(&self, id: &DocumentId, fields: D::Fields) -> RepositoryFuture<bool> {
        let documents = Arc::clone(&self.documents);
        let path = Arc::clone(&self.path);
        let id = id.clone();
        async move {
            let mut guard = documents.write().await;
            let Some(position) = guard.iter().position(|document| document.id() == &id) else {
                return Ok(false);
            };
            let mut next = guard.clone();
            next[position].replace_fields(fields);
            persist(&path, &next).await?;
            *guard = next;
            Ok(true)
        }
        .boxed()
    }

    fn delete_by_id(&self, id: &DocumentId) -> RepositoryFuture<bool> {
        let documents = Arc::clone(&self.documents);
        let path = Arc::clone(&self.path);
        let id = id.clone();
        async move {
            let mut guard = documents.write().await;
            if !guard.iter().any(|document| document.id() == &id) {
                return Ok(false);
            }
            let next: Vec<D> = guard
                .iter()
                .filter(|document| document.id() != &id)
                .cloned()
                .collect();
            persist(&path, &next).await?;
            *guard = next;
            Ok(true)
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFields, TaskFields};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let directory = tempfile::tempdir().unwrap();

        let repository = JsonFileTaskRepository::open(directory.path()).await.unwrap();

        assert!(repository.find_all().await.unwrap().is_empty());
        assert_eq!(repository.path(), directory.path().join("tasks.json"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let directory = tempfile::tempdir().unwrap();

        let (kept, renamed) = {
            let repository = JsonFileCategoryRepository::open(directory.path())
                .await
                .unwrap();
            let kept = repository
                .insert_one(CategoryFields::new("Work"))
                .await
                .unwrap();
            let renamed = repository
                .insert_one(CategoryFields::new("Hobby"))
                .await
                .unwrap();
            let dropped = repository
                .insert_one(CategoryFields::new("Errands"))
                .await
                .unwrap();
            assert!(
                repository
                    .update_by_id(&renamed, CategoryFields::new("Home"))
                    .await
                    .unwrap()
            );
            assert!(repository.delete_by_id(&dropped).await.unwrap());
            (kept, renamed)
        };

        let reopened = JsonFileCategoryRepository::open(directory.path())
            .await
            .unwrap();
        let categories = reopened.find_all().await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, kept);
        assert_eq!(categories[0].fields.category_name, "Work");
        assert_eq!(categories[1].id, renamed);
        assert_eq!(categories[1].fields.category_name, "Home");
    }

    #[rstest]
    #[tokio::test]
    async fn test_collections_use_separate_files() {
        let directory = tempfile::tempdir().unwrap();
        let tasks = JsonFileTaskRepository::open(directory.path()).await.unwrap();
        let categories = JsonFileCategoryRepository::open(directory.path())
            .await
            .unwrap();

        tasks.insert_one(TaskFields::new("Report")).await.unwrap();
        categories
            .insert_one(CategoryFields::new("Work"))
            .await
            .unwrap();

        assert!(directory.path().join("tasks.json").exists());
        assert!(directory.path().join("categories.json").exists());
        assert!(!directory.path().join("tasks.json.tmp").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_id_does_not_touch_disk() {
        let directory = tempfile::tempdir().unwrap();
        let repository = JsonFileTaskRepository::open(directory.path()).await.unwrap();

        let missing = DocumentId::new("missing");
        assert!(
            !repository
                .update_by_id(&missing, TaskFields::new("Nothing"))
                .await
                .unwrap()
        );
        assert!(!repository.delete_by_id(&missing).await.unwrap());
        assert!(!directory.path().join("tasks.json").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("categories.json"), "{not json").unwrap();

        let result = JsonFileCategoryRepository::open(directory.path()).await;

        assert!(matches!(
            result,
            Err(RepositoryError::SerializationError(_))
        ));
    }
}
