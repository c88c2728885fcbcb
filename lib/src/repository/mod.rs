//! Repository pattern implementation for database operations.
//!
//! Provides a clean abstraction over the listings database: the
//! [`ListingsOps`] trait defines every operation the services need,
//! [`Repository`] implements it against PostgreSQL through diesel-async,
//! and [`MockRepository`] provides an in-memory implementation for tests.
//!
//! Uniqueness of `users.sui_address` (and of `properties.token_id`) is
//! enforced by database constraints, not application-level locking;
//! callers racing through an insert catch the unique violation and retry
//! as a lookup.

use async_trait::async_trait;
use serde::Deserialize;

pub mod error;
#[cfg(any(test, feature = "mocks"))]
pub mod mock;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod schema;

pub use error::{RepositoryError, RepositoryResult};
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockRepository;
pub use models::{
    NewProperty, NewUser, Property, PropertyChanges, User, UserChanges,
};
pub use pool::ConnectionPool;
pub use postgres::Repository;

/// Sortable property columns for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySort {
    #[default]
    CreatedAt,
    Price,
    Area,
    Bedrooms,
    Bathrooms,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter and ordering criteria for a property search
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Free-text match against title, description and location
    pub query: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub location: Option<String>,
    pub is_listed: Option<bool>,
    pub sort_by: PropertySort,
    pub sort_order: SortOrder,
}

/// Main trait defining all listings storage operations.
///
/// Methods follow consistent naming: `create_*`, `get_*_by_*`,
/// `update_*`, `search_*`. All methods are async and return
/// [`RepositoryResult`]; `Option` return types indicate entities that
/// may legitimately be absent.
#[async_trait]
pub trait ListingsOps: Send + Sync {
    // ============ User Operations ============

    /// Insert a new user. Fails with a unique violation if the address
    /// (or username/email) is already taken.
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User>;

    /// Look up a user by Sui address.
    async fn get_user_by_address(&self, address: &str) -> RepositoryResult<Option<User>>;

    /// Look up a user by database id.
    async fn get_user_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Set the user's last-login timestamp to now.
    async fn touch_last_login(&self, id: i64) -> RepositoryResult<()>;

    /// Apply profile changes to a user.
    async fn update_user(&self, id: i64, changes: UserChanges) -> RepositoryResult<User>;

    // ============ Property Operations ============

    /// Insert a new property listing.
    async fn create_property(&self, new_property: NewProperty) -> RepositoryResult<Property>;

    /// Look up a property by database id.
    async fn get_property_by_id(&self, id: i64) -> RepositoryResult<Option<Property>>;

    /// Search properties with the given filter, ordering and page window.
    async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Property>>;

    /// Apply changes to a property.
    async fn update_property(
        &self,
        id: i64,
        changes: PropertyChanges,
    ) -> RepositoryResult<Property>;

    // ============ Favorite Operations ============

    /// Mark a property as a favorite of the user. Idempotent.
    async fn add_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<()>;

    /// Remove a favorite; returns whether a row was deleted.
    async fn remove_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<bool>;

    /// List the user's favorite properties, most recently added first.
    async fn favorites_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Property>>;

    // ============ Health ============

    /// Verify the backing store is reachable.
    async fn test_connection(&self) -> RepositoryResult<()>;
}
