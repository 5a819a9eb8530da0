//! Infrastructure module for external services.
//!
//! This module contains the persistence gateway, its storage backends and
//! the startup configuration.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod json_file;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod repository;

pub use config::{ConfigurationError, ServerConfig};
pub use factory::{FactoryError, Repositories, RepositoryConfig, RepositoryFactory, StorageMode};
pub use in_memory::{InMemoryCategoryRepository, InMemoryRepository, InMemoryTaskRepository};
pub use json_file::{JsonFileCategoryRepository, JsonFileRepository, JsonFileTaskRepository};
#[cfg(feature = "mongo")]
pub use mongo::{MongoCategoryRepository, MongoRepository, MongoTaskRepository};
pub use repository::{
    CategoryRepository, DocumentRepository, RepositoryError, RepositoryFuture, TaskRepository,
};
