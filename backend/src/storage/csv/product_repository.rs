use async_trait::async_trait;
use shared::Product;
use tracing::info;

use super::connection::{unsupported, CsvConnection};
use crate::error::StorageResult;
use crate::storage::traits::ProductStorage;

/// Read-only product repository backed by `Product.csv`
#[derive(Debug, Clone)]
pub struct CsvProductRepository {
    connection: CsvConnection,
}

impl CsvProductRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ProductStorage for CsvProductRepository {
    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        let file_path = self.connection.products_file_path();
        info!("Loading products from {}", file_path.display());

        let products = self.connection.read_records::<Product>(&file_path)?;

        info!("Loaded {} products", products.len());
        Ok(products)
    }

    async fn insert_product(&self, _product: &Product) -> StorageResult<()> {
        Err(unsupported("insert", "product"))
    }

    async fn delete_product(&self, _product_id: &str) -> StorageResult<bool> {
        Err(unsupported("delete", "product"))
    }

    async fn update_product_price(&self, _product_id: &str, _price: u32) -> StorageResult<bool> {
        Err(unsupported("update", "product"))
    }
}
