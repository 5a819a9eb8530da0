//! HTTP handlers.
//!
//! Read handlers fetch from the gateway and render a view. Write handlers
//! decode a typed form, call the gateway and redirect back to a list page.

pub mod categories;
pub mod health;
pub mod tasks;

pub use categories::{
    add_category, delete_category, edit_category, get_categories, insert_category,
    update_category,
};
pub use health::{HealthResponse, health_check};
pub use tasks::{add_task, edit_task, get_tasks, insert_task, update_task};

/// Task list page; target of every task write.
pub const TASKS_PATH: &str = "/get_tasks";

/// Category list page; target of every category write.
pub const CATEGORIES_PATH: &str = "/get_categories";
