//! Category domain model.

use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentId};
use super::lenient;

/// Editable fields of a category.
///
/// A `null` or missing `category_name` in a stored record reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    #[serde(default, deserialize_with = "lenient::name")]
    pub category_name: String,
}

impl CategoryFields {
    #[must_use]
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}

/// A named grouping label stored in the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: CategoryFields,
}

impl Document for Category {
    type Fields = CategoryFields;

    const COLLECTION: &'static str = "categories";
    const KIND: &'static str = "Category";

    fn from_parts(id: DocumentId, fields: CategoryFields) -> Self {
        Self { id, fields }
    }

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn fields(&self) -> &CategoryFields {
        &self.fields
    }

    fn replace_fields(&mut self, fields: CategoryFields) {
        self.fields = fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_category_round_trips_through_json() {
        let category = Category::from_parts(DocumentId::new("c-1"), CategoryFields::new("Work"));

        let json = serde_json::to_string(&category).unwrap();
        let decoded: Category = serde_json::from_str(&json).unwrap();

        assert_eq!(json, r#"{"id":"c-1","category_name":"Work"}"#);
        assert_eq!(decoded, category);
    }

    #[rstest]
    #[case(r#"{"id":"c-2","category_name":null}"#)]
    #[case(r#"{"id":"c-2"}"#)]
    fn test_category_without_name_decodes_as_empty(#[case] input: &str) {
        let category: Category = serde_json::from_str(input).unwrap();

        assert_eq!(category.fields, CategoryFields::new(""));
    }
}
