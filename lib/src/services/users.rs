//! User directory: maps Sui addresses to local user records.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Error;
use crate::models::properties::PropertyResponse;
use crate::models::users::{UpdateProfileRequest, UserResponse};
use crate::repository::{ListingsOps, NewUser, User, UserChanges};

pub struct UserService {
    repository: Arc<dyn ListingsOps>,
}

impl UserService {
    pub fn new(repository: Arc<dyn ListingsOps>) -> Self {
        Self { repository }
    }

    /// Look up a user by address, creating the record on first sign-in.
    ///
    /// Idempotent under concurrent calls for the same address: the
    /// database unique constraint decides the race, and the loser turns
    /// its unique violation into a re-lookup.
    pub async fn get_or_create(&self, address: &str) -> Result<User, Error> {
        if let Some(user) = self.repository.get_user_by_address(address).await? {
            return Ok(user);
        }

        match self
            .repository
            .create_user(NewUser::for_address(address))
            .await
        {
            Ok(user) => {
                debug!(target: "user_service::get_or_create", address = %address, "created user on first sign-in");
                Ok(user)
            }
            Err(e) if e.is_unique_violation() => {
                // lost the insert race; the row exists now
                self.repository
                    .get_user_by_address(address)
                    .await?
                    .ok_or(Error::Internal)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record a successful sign-in. Best-effort: a failure here must not
    /// fail the surrounding authentication flow.
    pub async fn touch_login(&self, user_id: i64) {
        if let Err(e) = self.repository.touch_last_login(user_id).await {
            warn!(target: "user_service::touch_login", user_id, error = %e, "failed to update last login");
        }
    }

    pub async fn find_by_address(&self, address: &str) -> Result<Option<User>, Error> {
        Ok(self.repository.get_user_by_address(address).await?)
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, Error> {
        let mut changes = UserChanges {
            username: request.username,
            email: request.email,
            avatar_url: request.avatar_url,
            bio: request.bio,
            updated_at: None,
        };
        if !changes.is_empty() {
            changes.updated_at = Some(Utc::now());
        }

        match self.repository.update_user(user_id, changes).await {
            Ok(user) => Ok(user.into()),
            Err(e) if e.is_unique_violation() => Err(Error::BadRequest(
                "Username or email already taken".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    // ============ Favorites ============

    pub async fn add_favorite(&self, user: &User, property_id: i64) -> Result<(), Error> {
        self.repository
            .get_property_by_id(property_id)
            .await?
            .ok_or_else(|| Error::NotFound("Property not found".to_string()))?;

        Ok(self.repository.add_favorite(user.id, property_id).await?)
    }

    pub async fn remove_favorite(&self, user: &User, property_id: i64) -> Result<(), Error> {
        if !self
            .repository
            .remove_favorite(user.id, property_id)
            .await?
        {
            return Err(Error::NotFound("Favorite not found".to_string()));
        }

        Ok(())
    }

    pub async fn list_favorites(&self, user: &User) -> Result<Vec<PropertyResponse>, Error> {
        Ok(self
            .repository
            .favorites_for_user(user.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::constants::mocks::MOCK_ADDRESS;
    use crate::repository::{
        MockRepository, NewProperty, Property, PropertyChanges, PropertyFilter,
        RepositoryResult,
    };

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let service = UserService::new(Arc::new(MockRepository::new()));

        let first = service.get_or_create(MOCK_ADDRESS).await.unwrap();
        let second = service.get_or_create(MOCK_ADDRESS).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.sui_address, MOCK_ADDRESS);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_yields_one_user() {
        let repository = Arc::new(MockRepository::new());
        let service = Arc::new(UserService::new(repository.clone()));

        let (a, b) = tokio::join!(
            {
                let service = service.clone();
                async move { service.get_or_create(MOCK_ADDRESS).await }
            },
            {
                let service = service.clone();
                async move { service.get_or_create(MOCK_ADDRESS).await }
            }
        );

        assert_eq!(a.unwrap().id, b.unwrap().id);
    }

    /// Repository that pretends the user is absent on the first lookup,
    /// forcing the service down the insert path into a unique violation.
    struct RacingRepository {
        inner: MockRepository,
        pretend_absent_once: AtomicBool,
    }

    #[async_trait]
    impl ListingsOps for RacingRepository {
        async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User> {
            self.inner.create_user(new_user).await
        }

        async fn get_user_by_address(&self, address: &str) -> RepositoryResult<Option<User>> {
            if self.pretend_absent_once.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.get_user_by_address(address).await
        }

        async fn get_user_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
            self.inner.get_user_by_id(id).await
        }

        async fn touch_last_login(&self, id: i64) -> RepositoryResult<()> {
            self.inner.touch_last_login(id).await
        }

        async fn update_user(&self, id: i64, changes: UserChanges) -> RepositoryResult<User> {
            self.inner.update_user(id, changes).await
        }

        async fn create_property(
            &self,
            new_property: NewProperty,
        ) -> RepositoryResult<Property> {
            self.inner.create_property(new_property).await
        }

        async fn get_property_by_id(&self, id: i64) -> RepositoryResult<Option<Property>> {
            self.inner.get_property_by_id(id).await
        }

        async fn search_properties(
            &self,
            filter: &PropertyFilter,
            limit: i64,
            offset: i64,
        ) -> RepositoryResult<Vec<Property>> {
            self.inner.search_properties(filter, limit, offset).await
        }

        async fn update_property(
            &self,
            id: i64,
            changes: PropertyChanges,
        ) -> RepositoryResult<Property> {
            self.inner.update_property(id, changes).await
        }

        async fn add_favorite(&self, user_id: i64, property_id: i64) -> RepositoryResult<()> {
            self.inner.add_favorite(user_id, property_id).await
        }

        async fn remove_favorite(
            &self,
            user_id: i64,
            property_id: i64,
        ) -> RepositoryResult<bool> {
            self.inner.remove_favorite(user_id, property_id).await
        }

        async fn favorites_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Property>> {
            self.inner.favorites_for_user(user_id).await
        }

        async fn test_connection(&self) -> RepositoryResult<()> {
            self.inner.test_connection().await
        }
    }

    #[tokio::test]
    async fn lost_insert_race_falls_back_to_lookup() {
        let repository = Arc::new(RacingRepository {
            inner: MockRepository::new(),
            pretend_absent_once: AtomicBool::new(false),
        });

        // existing row for the address
        let existing = repository
            .create_user(NewUser::for_address(MOCK_ADDRESS))
            .await
            .unwrap();

        // next lookup pretends the row is absent, so the service inserts,
        // hits the unique violation and must recover via re-lookup
        repository.pretend_absent_once.store(true, Ordering::SeqCst);

        let service = UserService::new(repository.clone());
        let user = service.get_or_create(MOCK_ADDRESS).await.unwrap();

        assert_eq!(user.id, existing.id);
    }

    #[tokio::test]
    async fn touch_login_failure_is_swallowed() {
        let service = UserService::new(Arc::new(MockRepository::new()));

        // no user with id 999; must not panic or error
        service.touch_login(999).await;
    }

    #[tokio::test]
    async fn update_profile_rejects_taken_username() {
        let repository = Arc::new(MockRepository::new());
        let service = UserService::new(repository.clone());

        let first = service.get_or_create(MOCK_ADDRESS).await.unwrap();
        service
            .update_profile(
                first.id,
                UpdateProfileRequest {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let second = service
            .get_or_create(crate::constants::mocks::MOCK_ADDRESS_2)
            .await
            .unwrap();
        let err = service
            .update_profile(
                second.id,
                UpdateProfileRequest {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BadRequest(_)));
    }
}
