//! Entity trait implementation for the User domain type.
//!
//! Users carry no dependencies and no custom actions. They are indexed by
//! [`Role`], so listing the admins is a direct lookup.

use super::error::UserError;
use crate::model::{Role, User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use gazon_actor::ActorEntity;

fn validate(name: &str, email: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationError("name must not be empty".into()));
    }
    if !email.contains('@') {
        return Err(UserError::ValidationError(format!(
            "invalid email address: {email}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Tag = Role;
    type Error = UserError;

    /// Creates a new, active User from creation parameters.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate(&params.name, &params.email)?;
        Ok(Self::new(id, params.name, params.email, params.role))
    }

    fn tag(&self) -> Role {
        self.role
    }

    /// Handles updates to the User entity.
    ///
    /// The new name and email are validated together before anything is written.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let email = update.email.unwrap_or_else(|| self.email.clone());
        validate(&name, &email)?;

        self.name = name;
        self.email = email;
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
