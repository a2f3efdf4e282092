//! # SQLite Storage Module
//!
//! Relational backend, selected with `dbtype: mysql`. Statements are fixed
//! templates with positional binds against two tables:
//!
//! - `product(productId, productName, productCategory, price, availableCity)`
//! - `user(userId, userName, email, phoneNumber, city)`
//!
//! Every operation opens its own connection through [`SqlConnector`] and
//! closes it before returning; nothing is pooled between calls.

pub mod connection;
pub mod product_repository;
pub mod user_repository;

pub use connection::SqlConnector;
pub use product_repository::SqlProductRepository;
pub use user_repository::SqlUserRepository;
