//! PostgreSQL repository implementation.
//!
//! Production implementation of [`ListingsOps`] using diesel-async over
//! a bb8 connection pool.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error::{RepositoryError, RepositoryResult};
use super::models::{NewFavorite, NewProperty, NewUser, Property, PropertyChanges, User,
    UserChanges};
use super::pool::ConnectionPool;
use super::schema::{properties, user_favorites, users};
use super::{ListingsOps, PropertyFilter, PropertySort, SortOrder};

/// PostgreSQL repository over a pooled diesel-async connection.
pub struct Repository {
    pool: ConnectionPool,
}

impl Repository {
    /// Create a new Repository with the given database URL.
    pub async fn new(database_url: &str, max_connections: u32) -> RepositoryResult<Self> {
        Ok(Self {
            pool: ConnectionPool::new(database_url, max_connections).await?,
        })
    }
}

#[async_trait]
impl ListingsOps for Repository {
    // ============ User Operations ============

    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        let mut conn = self.pool.get().await?;

        let user = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await?;

        Ok(user)
    }

    async fn get_user_by_address(&self, address: &str) -> RepositoryResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let result = users::table
            .filter(users::sui_address.eq(address))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()?;

        Ok(result)
    }

    async fn get_user_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let result = users::table
            .find(id)
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()?;

        Ok(result)
    }

    async fn touch_last_login(&self, id: i64) -> RepositoryResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.find(id))
            .set(users::last_login.eq(Utc::now()))
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> RepositoryResult<User> {
        let mut conn = self.pool.get().await?;

        if changes.is_empty() {
            return users::table
                .find(id)
                .select(User::as_select())
                .first(&mut *conn)
                .await
                .optional()?
                .ok_or_else(|| RepositoryError::not_found("User"));
        }

        let user = diesel::update(users::table.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await
            .optional()?
            .ok_or_else(|| RepositoryError::not_found("User"))?;

        Ok(user)
    }

    // ============ Property Operations ============

    async fn create_property(&self, new_property: NewProperty) -> RepositoryResult<Property> {
        let mut conn = self.pool.get().await?;

        let property = diesel::insert_into(properties::table)
            .values(&new_property)
            .returning(Property::as_returning())
            .get_result(&mut *conn)
            .await?;

        Ok(property)
    }

    async fn get_property_by_id(&self, id: i64) -> RepositoryResult<Option<Property>> {
        let mut conn = self.pool.get().await?;

        let result = properties::table
            .find(id)
            .select(Property::as_select())
            .first(&mut *conn)
            .await
            .optional()?;

        Ok(result)
    }

    async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Property>> {
        let mut conn = self.pool.get().await?;

        let mut query = properties::table
            .select(Property::as_select())
            .into_boxed();

        if let Some(text) = &filter.query {
            let pattern = format!("%{}%", text);
            query = query.filter(
                properties::title
                    .ilike(pattern.clone())
                    .or(properties::description.ilike(pattern.clone()))
                    .or(properties::location.ilike(pattern)),
            );
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(properties::price.ge(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(properties::price.le(max_price));
        }
        if let Some(property_type) = &filter.property_type {
            query = query.filter(properties::property_type.eq(property_type.clone()));
        }
        if let Some(bedrooms) = filter.bedrooms {
            query = query.filter(properties::bedrooms.eq(bedrooms));
        }
        if let Some(bathrooms) = filter.bathrooms {
            query = query.filter(properties::bathrooms.eq(bathrooms));
        }
        if let Some(min_area) = filter.min_area {
            query = query.filter(properties::area.ge(min_area));
        }
        if let Some(max_area) = filter.max_area {
            query = query.filter(properties::area.le(max_area));
        }
        if let Some(location) = &filter.location {
            query = query.filter(properties::location.ilike(format!("%{}%", location)));
        }
        if let Some(is_listed) = filter.is_listed {
            query = query.filter(properties::is_listed.eq(is_listed));
        }

        let ascending = filter.sort_order == SortOrder::Asc;
        query = match filter.sort_by {
            PropertySort::CreatedAt => {
                if ascending {
                    query.order(properties::created_at.asc())
                } else {
                    query.order(properties::created_at.desc())
                }
            }
            PropertySort::Price => {
                if ascending {
                    query.order(properties::price.asc())
                } else {
                    query.order(properties::price.desc())
                }
            }
            PropertySort::Area => {
                if ascending {
                    query.order(properties::area.asc())
                } else {
                    query.order(properties::area.desc())
                }
            }
            PropertySort::Bedrooms => {
                if ascending {
                    query.order(properties::bedrooms.asc())
                } else {
                    query.order(properties::bedrooms.desc())
                }
            }
            PropertySort::Bathrooms => {
                if ascending {
                    query.order(properties::bathrooms.asc())
                } else {
                    query.order(properties::bathrooms.desc())
                }
            }
            PropertySort::Title => {
                if ascending {
                    query.order(properties::title.asc())
                } else {
                    query.order(properties::title.desc())
                }
            }
        };

        let results = query
            .limit(limit)
            .offset(offset)
            .load(&mut *conn)
            .await?;

        Ok(results)
    }

    async fn update_property(
        &self,
        id: i64,
        changes: PropertyChanges,
    ) -> RepositoryResult<Property> {
        let mut conn = self.pool.get().await?;

        if changes.is_empty() {
            return properties::table
                .find(id)
                .select(Property::as_select())
                .first(&mut *conn)
                .await
                .optional()?
                .ok_or_else(|| RepositoryError::not_found("Property"));
        }

        let property = diesel::update(properties::table.find(id))
            .set(&changes)
            .returning(Property::as_returning())
            .get_result(&mut *conn)
            .await
            .optional()?
            .ok_or_else(|| RepositoryError::not_found("Property"))?;

        Ok(property)
    }

    // ============ Favorite Operations ============

    async fn add_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(user_favorites::table)
            .values(&NewFavorite {
                user_id,
                property_id,
                created_at: Utc::now(),
            })
            .on_conflict((user_favorites::user_id, user_favorites::property_id))
            .do_nothing()
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<bool> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(user_favorites::table.find((user_id, property_id)))
            .execute(&mut *conn)
            .await?;

        Ok(deleted > 0)
    }

    async fn favorites_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Property>> {
        let mut conn = self.pool.get().await?;

        let results = user_favorites::table
            .inner_join(properties::table)
            .filter(user_favorites::user_id.eq(user_id))
            .order(user_favorites::created_at.desc())
            .select(Property::as_select())
            .load(&mut *conn)
            .await?;

        Ok(results)
    }

    // ============ Health ============

    async fn test_connection(&self) -> RepositoryResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1").execute(&mut *conn).await?;

        Ok(())
    }
}
