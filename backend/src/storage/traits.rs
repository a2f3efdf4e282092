//! # Storage Traits
//!
//! The data-access contract shared by every backend. The domain layer only sees
//! these traits, so the flat-file and relational stores can be swapped without
//! touching the availability logic.

use async_trait::async_trait;
use shared::{Product, User};
use tracing::{info, warn};

use crate::error::StorageResult;

/// Product data access: list, insert, delete and price update
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// Load every product in store order
    async fn list_products(&self) -> StorageResult<Vec<Product>>;

    /// Store a new product
    async fn insert_product(&self, product: &Product) -> StorageResult<()>;

    /// Delete a product by ID
    /// Returns true if a product was found and deleted
    async fn delete_product(&self, product_id: &str) -> StorageResult<bool>;

    /// Set the price of a product
    /// Returns true if a product was found and updated
    async fn update_product_price(&self, product_id: &str, price: u32) -> StorageResult<bool>;

    /// Insert each product in turn, logging and skipping the ones that fail.
    /// Not atomic: earlier inserts stay in place when a later one fails.
    /// Returns the number of products actually inserted.
    async fn insert_products(&self, products: &[Product]) -> usize {
        let mut inserted = 0;
        for product in products {
            match self.insert_product(product).await {
                Ok(()) => inserted += 1,
                Err(e) => warn!("Skipping product {}: {}", product.id, e),
            }
        }
        info!("Inserted {} of {} products", inserted, products.len());
        inserted
    }
}

/// User data access: list, insert, delete and phone number update
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Load every user in store order
    async fn list_users(&self) -> StorageResult<Vec<User>>;

    /// Store a new user
    async fn insert_user(&self, user: &User) -> StorageResult<()>;

    /// Delete a user by ID
    /// Returns true if a user was found and deleted
    async fn delete_user(&self, user_id: &str) -> StorageResult<bool>;

    /// Set the phone number of a user
    /// Returns true if a user was found and updated
    async fn update_user_phone_number(&self, user_id: &str, phone_number: &str) -> StorageResult<bool>;

    /// Insert each user in turn, logging and skipping the ones that fail.
    /// Returns the number of users actually inserted.
    async fn insert_users(&self, users: &[User]) -> usize {
        let mut inserted = 0;
        for user in users {
            match self.insert_user(user).await {
                Ok(()) => inserted += 1,
                Err(e) => warn!("Skipping user {}: {}", user.id, e),
            }
        }
        info!("Inserted {} of {} users", inserted, users.len());
        inserted
    }
}
