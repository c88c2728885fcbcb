//! In-memory repository implementation for tests and mock mode.
//!
//! Mirrors the PostgreSQL behavior the services rely on, including
//! unique-violation errors on conflicting inserts, so the sign-in race
//! handling can be exercised without a database.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::error::{RepositoryError, RepositoryResult};
use super::models::{NewProperty, NewUser, Property, PropertyChanges, User, UserChanges};
use super::{ListingsOps, PropertyFilter, PropertySort, SortOrder};

/// In-memory implementation of [`ListingsOps`].
#[derive(Default)]
pub struct MockRepository {
    users: RwLock<Vec<User>>,
    properties: RwLock<Vec<Property>>,
    favorites: RwLock<Vec<(i64, i64, DateTime<Utc>)>>,
    next_user_id: AtomicI64,
    next_property_id: AtomicI64,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            next_user_id: AtomicI64::new(1),
            next_property_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    fn compare(a: &Property, b: &Property, sort_by: PropertySort) -> Ordering {
        match sort_by {
            PropertySort::CreatedAt => a.created_at.cmp(&b.created_at),
            PropertySort::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            PropertySort::Area => a.area.partial_cmp(&b.area).unwrap_or(Ordering::Equal),
            PropertySort::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
            PropertySort::Bathrooms => a.bathrooms.cmp(&b.bathrooms),
            PropertySort::Title => a.title.cmp(&b.title),
        }
    }

    fn matches(property: &Property, filter: &PropertyFilter) -> bool {
        if let Some(text) = &filter.query {
            let needle = text.to_lowercase();
            let hit = property.title.to_lowercase().contains(&needle)
                || property.description.to_lowercase().contains(&needle)
                || property.location.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(min_price) = filter.min_price {
            if property.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = filter.max_price {
            if property.price > max_price {
                return false;
            }
        }
        if let Some(property_type) = &filter.property_type {
            if &property.property_type != property_type {
                return false;
            }
        }
        if let Some(bedrooms) = filter.bedrooms {
            if property.bedrooms != bedrooms {
                return false;
            }
        }
        if let Some(bathrooms) = filter.bathrooms {
            if property.bathrooms != bathrooms {
                return false;
            }
        }
        if let Some(min_area) = filter.min_area {
            if property.area < min_area {
                return false;
            }
        }
        if let Some(max_area) = filter.max_area {
            if property.area > max_area {
                return false;
            }
        }
        if let Some(location) = &filter.location {
            if !property
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        if let Some(is_listed) = filter.is_listed {
            if property.is_listed != is_listed {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ListingsOps for MockRepository {
    // ============ User Operations ============

    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        let mut users = self.users.write();

        if users.iter().any(|u| u.sui_address == new_user.sui_address) {
            return Err(RepositoryError::unique_violation(
                "duplicate key value violates unique constraint \"users_sui_address_key\"",
            ));
        }

        let user = User {
            id: self.next_user_id.fetch_add(1, AtomicOrdering::SeqCst),
            sui_address: new_user.sui_address,
            username: None,
            email: None,
            avatar_url: None,
            bio: None,
            is_verified: new_user.is_verified,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
            updated_at: None,
            last_login: None,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn get_user_by_address(&self, address: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.sui_address == address)
            .cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn touch_last_login(&self, id: i64) -> RepositoryResult<()> {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::not_found("User"))?;
        user.last_login = Some(Utc::now());

        Ok(())
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> RepositoryResult<User> {
        let mut users = self.users.write();

        if changes.is_empty() && changes.updated_at.is_none() {
            return users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found("User"));
        }

        if let Some(username) = &changes.username {
            if users
                .iter()
                .any(|u| u.id != id && u.username.as_deref() == Some(username))
            {
                return Err(RepositoryError::unique_violation(
                    "duplicate key value violates unique constraint \"users_username_key\"",
                ));
            }
        }
        if let Some(email) = &changes.email {
            if users
                .iter()
                .any(|u| u.id != id && u.email.as_deref() == Some(email))
            {
                return Err(RepositoryError::unique_violation(
                    "duplicate key value violates unique constraint \"users_email_key\"",
                ));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::not_found("User"))?;

        if let Some(username) = changes.username {
            user.username = Some(username);
        }
        if let Some(email) = changes.email {
            user.email = Some(email);
        }
        if let Some(avatar_url) = changes.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        if let Some(bio) = changes.bio {
            user.bio = Some(bio);
        }
        user.updated_at = changes.updated_at.or(Some(Utc::now()));

        Ok(user.clone())
    }

    // ============ Property Operations ============

    async fn create_property(&self, new_property: NewProperty) -> RepositoryResult<Property> {
        let mut properties = self.properties.write();

        if let Some(token_id) = &new_property.token_id {
            if properties.iter().any(|p| p.token_id.as_ref() == Some(token_id)) {
                return Err(RepositoryError::unique_violation(
                    "duplicate key value violates unique constraint \"properties_token_id_key\"",
                ));
            }
        }

        let property = Property {
            id: self.next_property_id.fetch_add(1, AtomicOrdering::SeqCst),
            title: new_property.title,
            description: new_property.description,
            price: new_property.price,
            currency: new_property.currency,
            location: new_property.location,
            bedrooms: new_property.bedrooms,
            bathrooms: new_property.bathrooms,
            area: new_property.area,
            property_type: new_property.property_type,
            token_id: new_property.token_id,
            owner_address: new_property.owner_address,
            is_listed: new_property.is_listed,
            images: new_property.images,
            documents: new_property.documents,
            created_at: new_property.created_at,
            updated_at: None,
            owner_id: new_property.owner_id,
        };
        properties.push(property.clone());

        Ok(property)
    }

    async fn get_property_by_id(&self, id: i64) -> RepositoryResult<Option<Property>> {
        Ok(self
            .properties
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Property>> {
        let mut matches: Vec<Property> = self
            .properties
            .read()
            .iter()
            .filter(|p| Self::matches(p, filter))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let ordering = Self::compare(a, b, filter.sort_by);
            match filter.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(matches
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_property(
        &self,
        id: i64,
        changes: PropertyChanges,
    ) -> RepositoryResult<Property> {
        let mut properties = self.properties.write();

        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::not_found("Property"))?;

        if changes.is_empty() {
            return Ok(property.clone());
        }

        if let Some(title) = changes.title {
            property.title = title;
        }
        if let Some(description) = changes.description {
            property.description = description;
        }
        if let Some(price) = changes.price {
            property.price = price;
        }
        if let Some(currency) = changes.currency {
            property.currency = currency;
        }
        if let Some(location) = changes.location {
            property.location = location;
        }
        if let Some(bedrooms) = changes.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = changes.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(area) = changes.area {
            property.area = area;
        }
        if let Some(property_type) = changes.property_type {
            property.property_type = property_type;
        }
        if let Some(token_id) = changes.token_id {
            property.token_id = Some(token_id);
        }
        if let Some(is_listed) = changes.is_listed {
            property.is_listed = is_listed;
        }
        if let Some(images) = changes.images {
            property.images = images;
        }
        if let Some(documents) = changes.documents {
            property.documents = documents;
        }
        property.updated_at = changes.updated_at.or(Some(Utc::now()));

        Ok(property.clone())
    }

    // ============ Favorite Operations ============

    async fn add_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<()> {
        let mut favorites = self.favorites.write();

        if !favorites
            .iter()
            .any(|(u, p, _)| *u == user_id && *p == property_id)
        {
            favorites.push((user_id, property_id, Utc::now()));
        }

        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<bool> {
        let mut favorites = self.favorites.write();
        let before = favorites.len();
        favorites.retain(|(u, p, _)| !(*u == user_id && *p == property_id));

        Ok(favorites.len() < before)
    }

    async fn favorites_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Property>> {
        let mut entries: Vec<(i64, DateTime<Utc>)> = self
            .favorites
            .read()
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .map(|(_, p, at)| (*p, *at))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let properties = self.properties.read();
        Ok(entries
            .into_iter()
            .filter_map(|(property_id, _)| {
                properties.iter().find(|p| p.id == property_id).cloned()
            })
            .collect())
    }

    // ============ Health ============

    async fn test_connection(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_user_enforces_address_uniqueness() {
        let repo = MockRepository::new();

        repo.create_user(NewUser::for_address("0xaa")).await.unwrap();
        let err = repo
            .create_user(NewUser::for_address("0xaa"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(repo.users.read().len(), 1);
    }

    #[tokio::test]
    async fn remove_favorite_reports_whether_row_existed() {
        let repo = MockRepository::new();

        repo.add_favorite(1, 2).await.unwrap();
        assert!(repo.remove_favorite(1, 2).await.unwrap());
        assert!(!repo.remove_favorite(1, 2).await.unwrap());
    }
}
