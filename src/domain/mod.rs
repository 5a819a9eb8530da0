//! Domain module for task management.
//!
//! This module contains the stored entities and their shared document identity.

pub mod category;
pub mod document;
mod lenient;
pub mod task;

pub use category::{Category, CategoryFields};
pub use document::{Document, DocumentId};
pub use task::{Task, TaskFields};
