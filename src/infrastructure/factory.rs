//! Repository factory for runtime backend selection.
//!
//! This module provides a factory pattern for creating repository instances
//! based on environment configuration. It supports switching between the
//! in-memory, JSON file and `MongoDB` backends at runtime.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `json_file` | `mongo`
//! - `DATA_DIR`: directory for `json_file` collections (default: `data`)
//! - `MONGODB_CONNECTIONSTRING`: `MongoDB` base URI (default: `mongodb://localhost`)
//! - `MONGO_DBNAME`: `MongoDB` database name (default: `task_manager`)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repositories = RepositoryFactory::new(config).create().await?;
//! let tasks = repositories.task_repository.find_all().await?;
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::config::{ConfigurationError, lookup_trimmed};
use super::{
    CategoryRepository, InMemoryCategoryRepository, InMemoryTaskRepository,
    JsonFileCategoryRepository, JsonFileTaskRepository, RepositoryError, TaskRepository,
};

/// Default directory for the JSON file backend.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default `MongoDB` base URI.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost";

/// Default `MongoDB` database name.
pub const DEFAULT_MONGO_DATABASE: &str = "task_manager";

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for both collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    #[default]
    InMemory,
    /// One JSON file per collection under `DATA_DIR`.
    JsonFile,
    /// `MongoDB` (requires the `mongo` feature).
    Mongo,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "json_file" | "json" | "file" => Ok(Self::JsonFile),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Selected backend.
    pub storage_mode: StorageMode,
    /// Directory holding the JSON collections.
    pub data_directory: PathBuf,
    /// `MongoDB` base URI, without database name or options.
    pub mongo_uri: String,
    /// `MongoDB` database name.
    pub mongo_database: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            data_directory: PathBuf::from(DEFAULT_DATA_DIR),
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            mongo_database: DEFAULT_MONGO_DATABASE.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if `STORAGE_MODE`
    /// contains an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if `STORAGE_MODE`
    /// contains an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_mode = match lookup_trimmed(&lookup, "STORAGE_MODE") {
            Some(value) => value.parse()?,
            None => StorageMode::default(),
        };

        let data_directory = lookup_trimmed(&lookup, "DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let mongo_uri = lookup_trimmed(&lookup, "MONGODB_CONNECTIONSTRING")
            .unwrap_or_else(|| DEFAULT_MONGO_URI.to_string());
        let mongo_database = lookup_trimmed(&lookup, "MONGO_DBNAME")
            .unwrap_or_else(|| DEFAULT_MONGO_DATABASE.to_string());

        Ok(Self {
            storage_mode,
            data_directory,
            mongo_uri,
            mongo_database,
        })
    }

    /// Full `MongoDB` connection string: base URI, database and write options.
    #[must_use]
    pub fn mongo_connection_string(&self) -> String {
        format!(
            "{}/{}?retryWrites=true&w=majority",
            self.mongo_uri.trim_end_matches('/'),
            self.mongo_database
        )
    }
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A backend failed to open.
    #[error("Storage initialization error: {0}")]
    Storage(#[from] RepositoryError),

    /// The selected backend was not compiled in.
    #[error("Storage mode '{0}' is not available in this build (enable the '{0}' feature)")]
    BackendUnavailable(&'static str),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Collection of initialized repositories.
///
/// Both repositories are wrapped in `Arc` to allow sharing across handlers.
#[derive(Clone)]
pub struct Repositories {
    /// Gateway to the `tasks` collection.
    pub task_repository: Arc<TaskRepository>,
    /// Gateway to the `categories` collection.
    pub category_repository: Arc<CategoryRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("task_repository", &"Arc<dyn DocumentRepository<Task>>")
            .field("category_repository", &"Arc<dyn DocumentRepository<Category>>")
            .finish()
    }
}

impl Repositories {
    /// Creates empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            task_repository: Arc::new(InMemoryTaskRepository::new()),
            category_repository: Arc::new(InMemoryCategoryRepository::new()),
        }
    }
}

/// Factory for creating repository instances based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates both repositories for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if:
    /// - a JSON collection file cannot be read or parsed
    /// - the `MongoDB` client cannot be created
    /// - `mongo` is selected but the feature is not compiled in
    pub async fn create(&self) -> Result<Repositories, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Repositories::in_memory()),
            StorageMode::JsonFile => {
                let directory = &self.config.data_directory;
                Ok(Repositories {
                    task_repository: Arc::new(JsonFileTaskRepository::open(directory).await?),
                    category_repository: Arc::new(
                        JsonFileCategoryRepository::open(directory).await?,
                    ),
                })
            }
            StorageMode::Mongo => self.create_mongo_repositories().await,
        }
    }

    #[cfg(feature = "mongo")]
    async fn create_mongo_repositories(&self) -> Result<Repositories, FactoryError> {
        use super::mongo::{self, MongoCategoryRepository, MongoTaskRepository};

        let database = mongo::connect(
            &self.config.mongo_connection_string(),
            &self.config.mongo_database,
        )
        .await?;

        Ok(Repositories {
            task_repository: Arc::new(MongoTaskRepository::new(&database)),
            category_repository: Arc::new(MongoCategoryRepository::new(&database)),
        })
    }

    #[cfg(not(feature = "mongo"))]
    #[allow(clippy::unused_async)]
    async fn create_mongo_repositories(&self) -> Result<Repositories, FactoryError> {
        Err(FactoryError::BackendUnavailable("mongo"))
    }
}

// =============================================================================
// Tests
// =============================================================================
