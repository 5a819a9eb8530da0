//! `MongoDB` repository implementation.
//!
//! Documents are stored with a driver-generated `ObjectId` in `_id` and the
//! entity fields at the top level. Older records with a string or `null`
//! `is_urgent`, or a `null` name, still decode through the domain field
//! decoders. Identifiers that are not valid `ObjectId` hex strings match
//! nothing.

use std::marker::PhantomData;

use futures::{FutureExt, TryStreamExt};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document as BsonDocument, doc};
use mongodb::{Client, Collection, Database};

use crate::domain::{Category, Document, DocumentId, Task};
use crate::infrastructure::{DocumentRepository, RepositoryError, RepositoryFuture};

impl From<mongodb::error::Error> for RepositoryError {
    fn from(error: mongodb::error::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(error: bson::ser::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(error: bson::de::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

/// Connects to `MongoDB` and selects `database_name`.
///
/// # Errors
///
/// Returns `RepositoryError::DatabaseError` if the connection string is
/// invalid or the client cannot be created.
pub async fn connect(uri: &str, database_name: &str) -> Result<Database, RepositoryError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database_name))
}

/// `MongoDB` implementation of `DocumentRepository`.
#[derive(Debug, Clone)]
pub struct MongoRepository<D> {
    collection: Collection<BsonDocument>,
    marker: PhantomData<fn() -> D>,
}

/// `MongoDB` `tasks` collection.
pub type MongoTaskRepository = MongoRepository<Task>;

/// `MongoDB` `categories` collection.
pub type MongoCategoryRepository = MongoRepository<Category>;

impl<D: Document> MongoRepository<D> {
    /// Binds to the collection named after `D` in `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(D::COLLECTION),
            marker: PhantomData,
        }
    }
}

fn parse_object_id(id: &DocumentId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

fn decode<D: Document>(mut raw: BsonDocument) -> Result<D, RepositoryError> {
    let object_id = raw
        .get_object_id("_id")
        .map_err(|error| RepositoryError::SerializationError(error.to_string()))?;
    raw.remove("_id");
    let fields: D::Fields = bson::from_document(raw)?;
    Ok(D::from_parts(DocumentId::new(object_id.to_hex()), fields))
}

impl<D: Document> DocumentRepository<D> for MongoRepository<D> {
    fn find_all(&self) -> RepositoryFuture<Vec<D>> {
        let collection = self.collection.clone();
        async move {
            let cursor = collection.find(doc! {}).await?;
            let raw: Vec<BsonDocument> = cursor.try_collect().await?;
            raw.into_iter().map(decode::<D>).collect()
        }
        .boxed()
    }

    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<D>> {
        let collection = self.collection.clone();
        let object_id = parse_object_id(id);
        async move {
            let Some(object_id) = object_id else {
                return Ok(None);
            };
            collection
                .find_one(doc! { "_id": object_id })
                .await?
                .map(decode::<D>)
                .transpose()
        }
        .boxed()
    }

    fn insert_one(&self, fields: D::Fields) -> RepositoryFuture<DocumentId> {
        let collection = self.collection.clone();
        async move {
            let document = bson::to_document(&fields)?;
            let result = collection.insert_one(document).await?;
            result
                .inserted_id
                .as_object_id()
                .map(|object_id| DocumentId::new(object_id.to_hex()))
                .ok_or_else(|| {
                    RepositoryError::DatabaseError(format!(
                        "inserted id is not an ObjectId: {}",
                        result.inserted_id
                    ))
                })
        }
        .boxed()
    }

    fn update_by_id(&self, id: &DocumentId, fields: D::Fields) -> RepositoryFuture<bool> {
        let collection = self.collection.clone();
        let object_id = parse_object_id(id);
        async move {
            let Some(object_id) = object_id else {
                return Ok(false);
            };
            let replacement = bson::to_document(&fields)?;
            let result = collection
                .update_one(doc! { "_id": object_id }, doc! { "$set": replacement })
                .await?;
            Ok(result.matched_count > 0)
        }
        .boxed()
    }

    fn delete_by_id(&self, id: &DocumentId) -> RepositoryFuture<bool> {
        let collection = self.collection.clone();
        let object_id = parse_object_id(id);
        async move {
            let Some(object_id) = object_id else {
                return Ok(false);
            };
            let result = collection.delete_one(doc! { "_id": object_id }).await?;
            Ok(result.deleted_count > 0)
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
