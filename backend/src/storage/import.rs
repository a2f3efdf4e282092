//! Copies `Product.csv` and `User.csv` from a data directory into the
//! relational store named by a selector's configuration.

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::StorageResult;
use crate::storage::csv::{CsvConnection, CsvProductRepository, CsvUserRepository};
use crate::storage::selector::BackendSelector;
use crate::storage::sqlite::{SqlProductRepository, SqlUserRepository};
use crate::storage::traits::{ProductStorage, UserStorage};

/// Record counts of one import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub products_read: usize,
    pub products_imported: usize,
    pub users_read: usize,
    pub users_imported: usize,
}

/// Read both flat files, then insert every record into the relational store.
///
/// Both files are read in full before anything is written, so a malformed
/// source leaves the database untouched. Inserts that fail (duplicate ids,
/// for instance) are logged and skipped; the summary tells how many made it.
pub async fn import_flat_files<P: AsRef<Path>>(
    selector: &BackendSelector,
    source_directory: P,
) -> StorageResult<ImportSummary> {
    let source = CsvConnection::new(source_directory);
    info!("Importing flat files from {}", source.base_directory().display());

    let products = CsvProductRepository::new(source.clone()).list_products().await?;
    let users = CsvUserRepository::new(source).list_users().await?;

    let connector = selector.sql_connector()?;
    connector.setup_schema().await?;

    let summary = ImportSummary {
        products_read: products.len(),
        products_imported: SqlProductRepository::new(connector.clone())
            .insert_products(&products)
            .await,
        users_read: users.len(),
        users_imported: SqlUserRepository::new(connector).insert_users(&users).await,
    };

    info!(
        "Imported {}/{} products and {}/{} users into {}",
        summary.products_imported,
        summary.products_read,
        summary.users_imported,
        summary.users_read,
        selector.config().database_url
    );
    Ok(summary)
}
