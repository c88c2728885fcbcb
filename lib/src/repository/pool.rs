//! Connection pool for the listings database.

use diesel_async::pooled_connection::{bb8::Pool, AsyncDieselConnectionManager};
use diesel_async::AsyncPgConnection;

use super::error::RepositoryError;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'a> =
    diesel_async::pooled_connection::bb8::PooledConnection<'a, AsyncPgConnection>;

/// bb8-backed pool of async PostgreSQL connections.
pub struct ConnectionPool {
    inner: DbPool,
}

impl ConnectionPool {
    /// Create a new pool against the given database URL.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        let inner = Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to create pool: {}", e)))?;

        Ok(Self { inner })
    }

    /// Check out a connection from the pool.
    pub async fn get(&self) -> Result<DbConnection<'_>, RepositoryError> {
        self.inner
            .get()
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to get connection: {}", e)))
    }
}
