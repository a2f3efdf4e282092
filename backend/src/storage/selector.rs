//! # Backend Selector
//!
//! Turns the configured backend name into a concrete store. `csv` and `mysql`
//! are recognized case-insensitively. A missing or unrecognized name falls back
//! to the flat-file backend; that fallback is reported as its own
//! [`BackendChoice`] variant and logged, never raised as an error.

use async_trait::async_trait;
use shared::{Product, User};
use std::path::Path;
use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::storage::csv::{CsvConnection, CsvProductRepository, CsvUserRepository};
use crate::storage::sqlite::{SqlConnector, SqlProductRepository, SqlUserRepository};
use crate::storage::traits::{ProductStorage, UserStorage};

pub const FLAT_FILE_BACKEND: &str = "csv";
pub const RELATIONAL_BACKEND: &str = "mysql";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    FlatFile,
    Relational,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::FlatFile => FLAT_FILE_BACKEND,
            BackendKind::Relational => RELATIONAL_BACKEND,
        }
    }
}

/// Outcome of resolving a configured backend name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    /// The name matched a known backend
    Configured(BackendKind),
    /// No name was configured
    Default,
    /// The name was not recognized; the flat-file backend is used instead
    Fallback { requested: String },
}

impl BackendChoice {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendChoice::Configured(kind) => *kind,
            BackendChoice::Default | BackendChoice::Fallback { .. } => BackendKind::FlatFile,
        }
    }
}

/// Resolve a backend name
pub fn choose_backend(dbtype: Option<&str>) -> BackendChoice {
    match dbtype {
        None => BackendChoice::Default,
        Some(name) if name.eq_ignore_ascii_case(FLAT_FILE_BACKEND) => {
            BackendChoice::Configured(BackendKind::FlatFile)
        }
        Some(name) if name.eq_ignore_ascii_case(RELATIONAL_BACKEND) => {
            BackendChoice::Configured(BackendKind::Relational)
        }
        Some(name) => BackendChoice::Fallback {
            requested: name.to_string(),
        },
    }
}

/// Product store selected from configuration
#[derive(Debug, Clone)]
pub enum ProductStore {
    Csv(CsvProductRepository),
    Sql(SqlProductRepository),
}

/// User store selected from configuration
#[derive(Debug, Clone)]
pub enum UserStore {
    Csv(CsvUserRepository),
    Sql(SqlUserRepository),
}

impl ProductStore {
    pub fn kind(&self) -> BackendKind {
        match self {
            ProductStore::Csv(_) => BackendKind::FlatFile,
            ProductStore::Sql(_) => BackendKind::Relational,
        }
    }
}

impl UserStore {
    pub fn kind(&self) -> BackendKind {
        match self {
            UserStore::Csv(_) => BackendKind::FlatFile,
            UserStore::Sql(_) => BackendKind::Relational,
        }
    }
}

#[async_trait]
impl ProductStorage for ProductStore {
    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        match self {
            ProductStore::Csv(repo) => repo.list_products().await,
            ProductStore::Sql(repo) => repo.list_products().await,
        }
    }

    async fn insert_product(&self, product: &Product) -> StorageResult<()> {
        match self {
            ProductStore::Csv(repo) => repo.insert_product(product).await,
            ProductStore::Sql(repo) => repo.insert_product(product).await,
        }
    }

    async fn delete_product(&self, product_id: &str) -> StorageResult<bool> {
        match self {
            ProductStore::Csv(repo) => repo.delete_product(product_id).await,
            ProductStore::Sql(repo) => repo.delete_product(product_id).await,
        }
    }

    async fn update_product_price(&self, product_id: &str, price: u32) -> StorageResult<bool> {
        match self {
            ProductStore::Csv(repo) => repo.update_product_price(product_id, price).await,
            ProductStore::Sql(repo) => repo.update_product_price(product_id, price).await,
        }
    }
}

#[async_trait]
impl UserStorage for UserStore {
    async fn list_users(&self) -> StorageResult<Vec<User>> {
        match self {
            UserStore::Csv(repo) => repo.list_users().await,
            UserStore::Sql(repo) => repo.list_users().await,
        }
    }

    async fn insert_user(&self, user: &User) -> StorageResult<()> {
        match self {
            UserStore::Csv(repo) => repo.insert_user(user).await,
            UserStore::Sql(repo) => repo.insert_user(user).await,
        }
    }

    async fn delete_user(&self, user_id: &str) -> StorageResult<bool> {
        match self {
            UserStore::Csv(repo) => repo.delete_user(user_id).await,
            UserStore::Sql(repo) => repo.delete_user(user_id).await,
        }
    }

    async fn update_user_phone_number(&self, user_id: &str, phone_number: &str) -> StorageResult<bool> {
        match self {
            UserStore::Csv(repo) => repo.update_user_phone_number(user_id, phone_number).await,
            UserStore::Sql(repo) => repo.update_user_phone_number(user_id, phone_number).await,
        }
    }
}

/// Builds product and user stores for one explicitly supplied configuration
#[derive(Debug, Clone)]
pub struct BackendSelector {
    config: StorageConfig,
    choice: BackendChoice,
}

impl BackendSelector {
    pub fn new(config: StorageConfig) -> Self {
        let choice = choose_backend(config.dbtype.as_deref());

        match &choice {
            BackendChoice::Configured(kind) => info!("Using {} backend", kind.name()),
            BackendChoice::Default => info!("No backend configured, using {}", FLAT_FILE_BACKEND),
            BackendChoice::Fallback { requested } => warn!(
                "{} implementation does not exist, falling back to {}",
                requested, FLAT_FILE_BACKEND
            ),
        }

        Self { config, choice }
    }

    /// Load configuration from a YAML file and build a selector from it.
    /// A `dbtype` given here replaces the one in the file.
    pub fn from_config_file<P: AsRef<Path>>(path: P, dbtype: Option<&str>) -> StorageResult<Self> {
        let config = StorageConfig::load(path)?;
        Ok(Self::new(match dbtype {
            Some(dbtype) => config.with_dbtype(dbtype),
            None => config,
        }))
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn choice(&self) -> &BackendChoice {
        &self.choice
    }

    pub fn kind(&self) -> BackendKind {
        self.choice.kind()
    }

    pub fn product_store(&self) -> StorageResult<ProductStore> {
        Ok(match self.kind() {
            BackendKind::FlatFile => ProductStore::Csv(CsvProductRepository::new(self.csv_connection())),
            BackendKind::Relational => ProductStore::Sql(SqlProductRepository::new(self.sql_connector()?)),
        })
    }

    pub fn user_store(&self) -> StorageResult<UserStore> {
        Ok(match self.kind() {
            BackendKind::FlatFile => UserStore::Csv(CsvUserRepository::new(self.csv_connection())),
            BackendKind::Relational => UserStore::Sql(SqlUserRepository::new(self.sql_connector()?)),
        })
    }

    pub fn csv_connection(&self) -> CsvConnection {
        CsvConnection::new(&self.config.data_directory)
    }

    pub fn sql_connector(&self) -> StorageResult<SqlConnector> {
        SqlConnector::new(&self.config.database_url)
    }
}
