use async_trait::async_trait;
use shared::Product;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use tracing::{debug, info};

use super::connection::{decode_column, SqlConnector};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::ProductStorage;

const SELECT_QUERY: &str = "SELECT * FROM product";
const INSERT_QUERY: &str = "INSERT INTO product VALUES (?, ?, ?, ?, ?)";
const UPDATE_QUERY: &str = "UPDATE product SET price = ? WHERE productId = ?";
const DELETE_QUERY: &str = "DELETE FROM product WHERE productId = ?";

/// Product repository over the `product` table
#[derive(Debug, Clone)]
pub struct SqlProductRepository {
    connector: SqlConnector,
}

impl SqlProductRepository {
    pub fn new(connector: SqlConnector) -> Self {
        Self { connector }
    }

    async fn select_all(connection: &mut SqliteConnection) -> StorageResult<Vec<Product>> {
        let rows = sqlx::query(SELECT_QUERY)
            .fetch_all(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access("unable to access the product table", e))?;

        rows.iter().map(product_from_row).collect()
    }

    async fn insert(connection: &mut SqliteConnection, product: &Product) -> StorageResult<()> {
        sqlx::query(INSERT_QUERY)
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(i64::from(product.price))
            .bind(&product.available_city)
            .execute(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to insert product with id {}", product.id), e))?;
        Ok(())
    }

    async fn delete(connection: &mut SqliteConnection, product_id: &str) -> StorageResult<bool> {
        let result = sqlx::query(DELETE_QUERY)
            .bind(product_id)
            .execute(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to delete product with id {}", product_id), e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_price(connection: &mut SqliteConnection, product_id: &str, price: u32) -> StorageResult<bool> {
        let result = sqlx::query(UPDATE_QUERY)
            .bind(i64::from(price))
            .bind(product_id)
            .execute(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to update product with id {}", product_id), e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn product_from_row(row: &SqliteRow) -> StorageResult<Product> {
    let id: String = decode_column(row, 0, "product row")?;
    let record = format!("product {}", id);

    let price: i64 = decode_column(row, 3, &record)?;
    let price = u32::try_from(price).map_err(|_| {
        StorageError::malformed(&record, format!("price {} is not a non-negative integer", price))
    })?;

    Ok(Product {
        name: decode_column(row, 1, &record)?,
        category: decode_column(row, 2, &record)?,
        price,
        available_city: decode_column(row, 4, &record)?,
        id,
    })
}

#[async_trait]
impl ProductStorage for SqlProductRepository {
    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        info!("Loading products from {}", self.connector.url());

        let mut connection = self.connector.acquire().await?;
        let result = Self::select_all(&mut connection).await;
        self.connector.release(connection).await;

        let products = result?;
        info!("Loaded {} products", products.len());
        Ok(products)
    }

    async fn insert_product(&self, product: &Product) -> StorageResult<()> {
        debug!("Inserting product {}", product.id);

        let mut connection = self.connector.acquire().await?;
        let result = Self::insert(&mut connection, product).await;
        self.connector.release(connection).await;
        result
    }

    async fn delete_product(&self, product_id: &str) -> StorageResult<bool> {
        debug!("Deleting product {}", product_id);

        let mut connection = self.connector.acquire().await?;
        let result = Self::delete(&mut connection, product_id).await;
        self.connector.release(connection).await;
        result
    }

    async fn update_product_price(&self, product_id: &str, price: u32) -> StorageResult<bool> {
        debug!("Updating price of product {} to {}", product_id, price);

        let mut connection = self.connector.acquire().await?;
        let result = Self::update_price(&mut connection, product_id, price).await;
        self.connector.release(connection).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_products, TestEnvironment};

    async fn setup_test() -> (TestEnvironment, SqlProductRepository) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let connector = env.sql_connector().await.expect("Failed to create test database");
        (env, SqlProductRepository::new(connector))
    }

    #[tokio::test]
    async fn test_insert_and_list_products() {
        let (_env, repo) = setup_test().await;

        for product in sample_products() {
            repo.insert_product(&product).await.expect("Failed to insert product");
        }

        let products = repo.list_products().await.expect("Failed to list products");
        assert_eq!(products, sample_products());
    }

    #[tokio::test]
    async fn test_list_empty_table() {
        let (_env, repo) = setup_test().await;
        assert!(repo.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_price() {
        let (_env, repo) = setup_test().await;
        repo.insert_products(&sample_products()).await;

        let updated = repo.update_product_price("P1001", 1999).await.unwrap();
        assert!(updated);

        let products = repo.list_products().await.unwrap();
        let kettle = products.iter().find(|p| p.id == "P1001").unwrap();
        assert_eq!(kettle.price, 1999);

        assert!(!repo.update_product_price("P0000", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (_env, repo) = setup_test().await;
        repo.insert_products(&sample_products()).await;

        assert!(repo.delete_product("P1001").await.unwrap());
        assert!(!repo.delete_product("P1001").await.unwrap());

        let products = repo.list_products().await.unwrap();
        assert_eq!(products.len(), sample_products().len() - 1);
        assert!(products.iter().all(|p| p.id != "P1001"));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_data_access_error() {
        let (_env, repo) = setup_test().await;
        let product = Product::new("P1", "Kettle", "Kitchen", 1200, "Pune");

        repo.insert_product(&product).await.unwrap();
        let err = repo.insert_product(&product).await.unwrap_err();

        assert!(matches!(err, StorageError::DataAccess { .. }));
        assert!(err.to_string().contains("P1"));
    }

    #[tokio::test]
    async fn test_bulk_insert_skips_failures() {
        let (_env, repo) = setup_test().await;
        let mut products = sample_products();
        products.push(products[0].clone());

        let inserted = repo.insert_products(&products).await;

        assert_eq!(inserted, sample_products().len());
        assert_eq!(repo.list_products().await.unwrap().len(), sample_products().len());
    }

    #[tokio::test]
    async fn test_non_numeric_price_aborts_read() {
        let (env, repo) = setup_test().await;
        repo.insert_products(&sample_products()).await;
        env.execute_sql("INSERT INTO product VALUES ('P5000', 'Broken', 'Kitchen', 'free', 'Pune')")
            .await
            .unwrap();

        let err = repo.list_products().await.unwrap_err();

        match err {
            StorageError::MalformedRecord { record, .. } => assert_eq!(record, "product P5000"),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_negative_price_aborts_read() {
        let (env, repo) = setup_test().await;
        env.execute_sql("INSERT INTO product VALUES ('P6000', 'Refund', 'Misc', -10, 'Pune')")
            .await
            .unwrap();

        assert!(matches!(
            repo.list_products().await,
            Err(StorageError::MalformedRecord { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_data_access_error() {
        let env = TestEnvironment::new().unwrap();
        let missing = env.base_directory().join("missing").join("nowhere.db");
        let connector = SqlConnector::new(&format!("sqlite://{}", missing.display())).unwrap();
        let repo = SqlProductRepository::new(connector);

        assert!(matches!(
            repo.list_products().await,
            Err(StorageError::DataAccess { .. })
        ));
    }
}
