//! Document identity shared by every stored entity.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Document Identifier
// =============================================================================

/// Opaque identifier assigned by the store when a document is inserted.
///
/// The textual form depends on the backend (UUID for in-process stores,
/// `ObjectId` hex for `MongoDB`). Callers never interpret it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an identifier received from a request path or a backend.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a new time-ordered identifier (UUID v7).
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// Document Trait
// =============================================================================

/// An entity stored in a named collection of the document store.
///
/// A document is an identifier plus a set of named fields. Stores only ever
/// replace the whole field set; the identifier never changes after insert.
pub trait Document:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The mutable part of the document.
    type Fields: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Name of the collection holding documents of this type.
    const COLLECTION: &'static str;

    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    /// Assembles a document from its identifier and fields.
    fn from_parts(id: DocumentId, fields: Self::Fields) -> Self;

    /// Returns the document identifier.
    fn id(&self) -> &DocumentId;

    /// Returns the document fields.
    fn fields(&self) -> &Self::Fields;

    /// Replaces every field, keeping the identifier.
    fn replace_fields(&mut self, fields: Self::Fields);
}

// =============================================================================
// Tests
// =============================================================================
