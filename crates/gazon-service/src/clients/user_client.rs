//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes domain‑specific methods.
use crate::model::{Role, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use gazon_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

impl From<ResourceClient<User>> for UserClient {
    fn from(inner: ResourceClient<User>) -> Self {
        Self::new(inner)
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from_framework(e)
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(UserError::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(UserError::from_framework)
    }

    /// Soft delete: the user stays in the store with `active = false`.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: UserId) -> Result<User, UserError> {
        let update = UserUpdate {
            active: Some(false),
            ..Default::default()
        };
        self.update_user(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_role(&self, role: Role) -> Result<Vec<User>, UserError> {
        self.find_by_tag(role).await
    }

    /// Returns the user if it is an active admin, `Forbidden` otherwise.
    #[instrument(skip(self))]
    pub async fn require_admin(&self, id: UserId) -> Result<User, UserError> {
        let user = self
            .get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        if !user.is_admin() {
            debug!(user_id = %id, role = ?user.role, active = user.active, "Admin check failed");
            return Err(UserError::Forbidden(format!("{id} is not an active admin")));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazon_actor::mock::MockClient;

    #[tokio::test]
    async fn test_require_admin() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(1))
            .return_ok(Some(User::new(UserId(1), "Ada", "ada@gazon.io", Role::Admin)));
        mock.expect_get(UserId(2))
            .return_ok(Some(User::new(UserId(2), "Bob", "bob@example.com", Role::Customer)));
        mock.expect_get(UserId(3)).return_ok(None);

        let mut retired = User::new(UserId(4), "Eve", "eve@gazon.io", Role::Admin);
        retired.active = false;
        mock.expect_get(UserId(4)).return_ok(Some(retired));

        let client = UserClient::new(mock.client());
        assert_eq!(client.require_admin(UserId(1)).await.unwrap().name, "Ada");
        assert!(matches!(
            client.require_admin(UserId(2)).await,
            Err(UserError::Forbidden(_))
        ));
        assert!(matches!(
            client.require_admin(UserId(3)).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            client.require_admin(UserId(4)).await,
            Err(UserError::Forbidden(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_update_maps_missing_user() {
        let mut mock = MockClient::<User>::new();
        mock.expect_update(UserId(9))
            .return_err(FrameworkError::NotFound("user_9".into()));

        let client = UserClient::new(mock.client());
        let result = client.deactivate(UserId(9)).await;
        assert_eq!(result, Err(UserError::NotFound("user_9".into())));
        mock.verify();
    }
}
