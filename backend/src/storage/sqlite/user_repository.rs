use async_trait::async_trait;
use shared::User;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use tracing::{debug, info};

use super::connection::{decode_column, SqlConnector};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::UserStorage;

const SELECT_QUERY: &str = "SELECT * FROM user";
const INSERT_QUERY: &str = "INSERT INTO user VALUES (?, ?, ?, ?, ?)";
const UPDATE_QUERY: &str = "UPDATE user SET phoneNumber = ? WHERE userId = ?";
const DELETE_QUERY: &str = "DELETE FROM user WHERE userId = ?";

/// User repository over the `user` table
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    connector: SqlConnector,
}

impl SqlUserRepository {
    pub fn new(connector: SqlConnector) -> Self {
        Self { connector }
    }

    async fn select_all(connection: &mut SqliteConnection) -> StorageResult<Vec<User>> {
        let rows = sqlx::query(SELECT_QUERY)
            .fetch_all(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access("unable to access the user table", e))?;

        rows.iter().map(user_from_row).collect()
    }

    async fn insert(connection: &mut SqliteConnection, user: &User) -> StorageResult<()> {
        sqlx::query(INSERT_QUERY)
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.city)
            .execute(&mut *connection)
            .await
            .map_err(|e| {
                StorageError::data_access(format!("unable to insert user with id {} into the database", user.id), e)
            })?;
        Ok(())
    }

    async fn delete(connection: &mut SqliteConnection, user_id: &str) -> StorageResult<bool> {
        let result = sqlx::query(DELETE_QUERY)
            .bind(user_id)
            .execute(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to delete user with id {}", user_id), e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_phone_number(
        connection: &mut SqliteConnection,
        user_id: &str,
        phone_number: &str,
    ) -> StorageResult<bool> {
        let result = sqlx::query(UPDATE_QUERY)
            .bind(phone_number)
            .bind(user_id)
            .execute(&mut *connection)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to update user with id {}", user_id), e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn user_from_row(row: &SqliteRow) -> StorageResult<User> {
    let id: String = decode_column(row, 0, "user row")?;
    let record = format!("user {}", id);

    Ok(User {
        name: decode_column(row, 1, &record)?,
        email: decode_column(row, 2, &record)?,
        phone_number: decode_column(row, 3, &record)?,
        city: decode_column(row, 4, &record)?,
        id,
    })
}

#[async_trait]
impl UserStorage for SqlUserRepository {
    async fn list_users(&self) -> StorageResult<Vec<User>> {
        info!("Loading users from {}", self.connector.url());

        let mut connection = self.connector.acquire().await?;
        let result = Self::select_all(&mut connection).await;
        self.connector.release(connection).await;

        let users = result?;
        info!("Loaded {} users", users.len());
        Ok(users)
    }

    async fn insert_user(&self, user: &User) -> StorageResult<()> {
        debug!("Inserting user {}", user.id);

        let mut connection = self.connector.acquire().await?;
        let result = Self::insert(&mut connection, user).await;
        self.connector.release(connection).await;
        result
    }

    async fn delete_user(&self, user_id: &str) -> StorageResult<bool> {
        debug!("Deleting user {}", user_id);

        let mut connection = self.connector.acquire().await?;
        let result = Self::delete(&mut connection, user_id).await;
        self.connector.release(connection).await;
        result
    }

    async fn update_user_phone_number(&self, user_id: &str, phone_number: &str) -> StorageResult<bool> {
        debug!("Updating phone number of user {}", user_id);

        let mut connection = self.connector.acquire().await?;
        let result = Self::update_phone_number(&mut connection, user_id, phone_number).await;
        self.connector.release(connection).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_users, TestEnvironment};

    async fn setup_test() -> (TestEnvironment, SqlUserRepository) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let connector = env.sql_connector().await.expect("Failed to create test database");
        (env, SqlUserRepository::new(connector))
    }

    #[tokio::test]
    async fn test_insert_and_list_users() {
        let (_env, repo) = setup_test().await;

        assert_eq!(repo.insert_users(&sample_users()).await, sample_users().len());

        let users = repo.list_users().await.expect("Failed to list users");
        assert_eq!(users, sample_users());
    }

    #[tokio::test]
    async fn test_update_phone_number() {
        let (_env, repo) = setup_test().await;
        repo.insert_users(&sample_users()).await;

        assert!(repo.update_user_phone_number("U1001", "+91 90000 00000").await.unwrap());

        let users = repo.list_users().await.unwrap();
        let asha = users.iter().find(|u| u.id == "U1001").unwrap();
        assert_eq!(asha.phone_number, "+91 90000 00000");
        assert_eq!(asha.city, "Pune");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (_env, repo) = setup_test().await;
        repo.insert_users(&sample_users()).await;

        assert!(repo.delete_user("U1002").await.unwrap());
        assert!(!repo.delete_user("U1002").await.unwrap());
        assert!(repo.list_users().await.unwrap().iter().all(|u| u.id != "U1002"));
    }

    #[tokio::test]
    async fn test_blob_column_aborts_read() {
        let (env, repo) = setup_test().await;
        repo.insert_users(&sample_users()).await;
        env.execute_sql("INSERT INTO user VALUES ('U9000', 'Broken', X'00FF', '5550000', 'Pune')")
            .await
            .unwrap();

        match repo.list_users().await {
            Err(StorageError::MalformedRecord { record, .. }) => assert_eq!(record, "user U9000"),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_text_id_aborts_read() {
        let (env, repo) = setup_test().await;
        env.execute_sql("INSERT INTO user VALUES (X'01', 'Nobody', 'n@example.com', '1', 'Pune')")
            .await
            .unwrap();

        assert!(matches!(
            repo.list_users().await,
            Err(StorageError::MalformedRecord { .. })
        ));
    }
}
