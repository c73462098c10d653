use crate::entities::*;
use sea_orm::*;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct User {
    id: u32,
    name: String,
}

impl User {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }

    /// Returns the ID of the user.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the name of the user.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        User::new(model.id as u32, model.name)
    }
}

/// Error type for UserService operations.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Represents a user not found error.
    #[error("User with ID {0} not found")]
    UserNotFound(u32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Read-only access to the user collection. Users are referenced by tasks
/// and never mutated through this service.
pub struct UserService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl UserService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> UserService {
        UserService { db }
    }

    /// Retrieves a user by their ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the user to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `User` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: u32) -> Result<User, UserServiceError> {
        let user_model = user::Entity::find_by_id(id as i32)
            .one(self.db)
            .await?
            .ok_or(UserServiceError::UserNotFound(id))?;
        Ok(User::from(user_model))
    }
}
