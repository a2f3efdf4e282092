use async_trait::async_trait;
use shared::User;
use tracing::info;

use super::connection::{unsupported, CsvConnection};
use crate::error::StorageResult;
use crate::storage::traits::UserStorage;

/// Read-only user repository backed by `User.csv`
#[derive(Debug, Clone)]
pub struct CsvUserRepository {
    connection: CsvConnection,
}

impl CsvUserRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for CsvUserRepository {
    async fn list_users(&self) -> StorageResult<Vec<User>> {
        let file_path = self.connection.users_file_path();
        info!("Loading users from {}", file_path.display());

        let users = self.connection.read_records::<User>(&file_path)?;

        info!("Loaded {} users", users.len());
        Ok(users)
    }

    async fn insert_user(&self, _user: &User) -> StorageResult<()> {
        Err(unsupported("insert", "user"))
    }

    async fn delete_user(&self, _user_id: &str) -> StorageResult<bool> {
        Err(unsupported("delete", "user"))
    }

    async fn update_user_phone_number(&self, _user_id: &str, _phone_number: &str) -> StorageResult<bool> {
        Err(unsupported("update", "user"))
    }
}
