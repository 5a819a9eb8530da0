//! Task manager web application.
//!
//! A small server-rendered CRUD application over two document collections,
//! `tasks` and `categories`. Handlers talk to the store only through the
//! [`infrastructure::DocumentRepository`] gateway, which has in-memory, JSON
//! file and (with the `mongo` feature) `MongoDB` backends.
//!
//! # Modules
//!
//! - [`domain`]: documents and their field sets
//! - [`infrastructure`]: storage backends, factory and configuration
//! - [`view`]: templates and the HTML renderer
//! - [`api`]: routes, handlers and form decoding

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod view;
