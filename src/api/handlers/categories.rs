//! Category handlers.

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, Redirect},
};

use super::CATEGORIES_PATH;
use crate::api::error::ApiErrorResponse;
use crate::api::form::CategoryForm;
use crate::api::state::AppState;
use crate::domain::{Category, DocumentId};
use crate::infrastructure::RepositoryError;
use crate::view::View;

/// Lists every category.
///
/// # Errors
///
/// Returns a 500 response if the store or the renderer fails.
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Html<String>, ApiErrorResponse> {
    let categories = state.category_repository.find_all().await?;
    tracing::debug!(count = categories.len(), "Listing categories");
    state.render(&View::Categories { categories })
}

/// Shows the category-creation form.
///
/// # Errors
///
/// Returns a 500 response if the renderer fails.
pub async fn add_category(State(state): State<AppState>) -> Result<Html<String>, ApiErrorResponse> {
    state.render(&View::AddCategory)
}

/// Creates a category and redirects to the category list.
///
/// # Errors
///
/// - 400 if the body cannot be decoded or `category_name` is blank
/// - 500 if the store fails
pub async fn insert_category(
    State(state): State<AppState>,
    form: Result<Form<CategoryForm>, FormRejection>,
) -> Result<Redirect, ApiErrorResponse> {
    let Form(form) = form?;
    let fields = form.validate()?;

    let category_id = state.category_repository.insert_one(fields).await?;
    tracing::info!(%category_id, "Category created");

    Ok(Redirect::to(CATEGORIES_PATH))
}

/// Shows the edit form for one category.
///
/// # Errors
///
/// - 404 if no category has this id
/// - 500 if the store or the renderer fails
pub async fn edit_category(
    State(state): State<AppState>,
    Path(category_id): Path<DocumentId>,
) -> Result<Html<String>, ApiErrorResponse> {
    let category = state
        .category_repository
        .find_by_id(&category_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found::<Category>(&category_id))?;

    state.render(&View::EditCategory { category })
}

/// Renames one category and redirects to the category list.
///
/// Tasks that refer to the old name keep it.
///
/// # Errors
///
/// - 400 if the body cannot be decoded or `category_name` is blank
/// - 404 if no category has this id
/// - 500 if the store fails
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<DocumentId>,
    form: Result<Form<CategoryForm>, FormRejection>,
) -> Result<Redirect, ApiErrorResponse> {
    let Form(form) = form?;
    let fields = form.validate()?;

    if !state
        .category_repository
        .update_by_id(&category_id, fields)
        .await?
    {
        return Err(RepositoryError::not_found::<Category>(&category_id).into());
    }
    tracing::info!(%category_id, "Category updated");

    Ok(Redirect::to(CATEGORIES_PATH))
}

/// Deletes one category and redirects to the category list.
///
/// Deleting an unknown id still redirects. Tasks that refer to the category
/// are left untouched.
///
/// # Errors
///
/// Returns a 500 response if the store fails.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<DocumentId>,
) -> Result<Redirect, ApiErrorResponse> {
    if state.category_repository.delete_by_id(&category_id).await? {
        tracing::info!(%category_id, "Category deleted");
    } else {
        tracing::debug!(%category_id, "No category to delete");
    }

    Ok(Redirect::to(CATEGORIES_PATH))
}
