use crate::entities::*;
use crate::user::{User, UserService, UserServiceError};
use sea_orm::*;
use std::sync::Arc;

pub mod api;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: u32,
    text: String,
    completed: bool,
    add_by_admin: bool,
    owner_id: u32,
}

impl Task {
    pub fn new(id: u32, text: String, completed: bool, add_by_admin: bool, owner_id: u32) -> Self {
        Self {
            id,
            text,
            completed,
            add_by_admin,
            owner_id,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the text content of the task.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the task was created administratively.
    pub fn add_by_admin(&self) -> bool {
        self.add_by_admin
    }

    /// Returns the ID of the owning user.
    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id as u32,
            model.text,
            model.completed,
            model.add_by_admin,
            model.owner_id as u32,
        )
    }
}

/// A task together with its owner resolved to the full user record.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct TaskWithOwner {
    task: Task,
    owner: User,
}

impl TaskWithOwner {
    pub fn new(task: Task, owner: User) -> Self {
        Self { task, owner }
    }

    /// Returns the task.
    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owning user.
    pub fn owner(&self) -> &User {
        &self.owner
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a missing owner at creation time.
    #[error("User with ID {0} not found")]
    OwnerNotFound(u32),
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(u32),
    /// Represents a task whose owner record is gone from the user collection.
    #[error("Task with ID {0} references a missing owner")]
    OrphanedTask(u32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<UserServiceError> for TaskServiceError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UserNotFound(id) => TaskServiceError::OwnerNotFound(id),
            UserServiceError::Database(err) => TaskServiceError::Database(err),
        }
    }
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService {
        TaskService { db }
    }

    /// Creates a new task owned by an existing user.
    ///
    /// The owner is looked up before the insert; if it does not exist, no
    /// task is created.
    ///
    /// # Arguments
    ///
    /// * `text` - The text content of the task.
    /// * `completed` - Whether the task starts out completed.
    /// * `add_by_admin` - Whether the task was created administratively.
    /// * `owner_id` - The ID of the owning user.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(
        &self,
        text: String,
        completed: bool,
        add_by_admin: bool,
        owner_id: u32,
    ) -> Result<Task, TaskServiceError> {
        let owner = UserService::new(self.db).get_user_by_id(owner_id).await?;

        let active_model = task::ActiveModel {
            text: ActiveValue::Set(text),
            completed: ActiveValue::Set(completed),
            add_by_admin: ActiveValue::Set(add_by_admin),
            owner_id: ActiveValue::Set(owner.id() as i32),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Retrieves all tasks with their owners resolved, in no particular order.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `TaskWithOwner` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<TaskWithOwner>, TaskServiceError> {
        let rows = task::Entity::find()
            .find_also_related(user::Entity)
            .all(self.db)
            .await?;
        rows.into_iter()
            .map(|(task_model, owner_model)| {
                let task_id = task_model.id as u32;
                let owner = owner_model.ok_or(TaskServiceError::OrphanedTask(task_id))?;
                Ok(TaskWithOwner::new(
                    Task::from(task_model),
                    User::from(owner),
                ))
            })
            .collect()
    }

    /// Retrieves a task by its ID with its owner resolved.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `TaskWithOwner` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: u32) -> Result<TaskWithOwner, TaskServiceError> {
        let (task_model, owner_model) = task::Entity::find_by_id(id as i32)
            .find_also_related(user::Entity)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let owner = owner_model.ok_or(TaskServiceError::OrphanedTask(id))?;
        Ok(TaskWithOwner::new(
            Task::from(task_model),
            User::from(owner),
        ))
    }

    /// Replaces the mutable fields of a task by its ID.
    ///
    /// All three fields are overwritten wholesale; the owner is never
    /// altered by this operation.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to update.
    /// * `text` - The new text content.
    /// * `completed` - The new completion flag.
    /// * `add_by_admin` - The new administrative flag.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(
        &self,
        id: u32,
        text: String,
        completed: bool,
        add_by_admin: bool,
    ) -> Result<Task, TaskServiceError> {
        let task_to_update = task::Entity::find_by_id(id as i32)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let mut active_model: task::ActiveModel = task_to_update.into();
        active_model.text = ActiveValue::Set(text);
        active_model.completed = ActiveValue::Set(completed);
        active_model.add_by_admin = ActiveValue::Set(add_by_admin);
        let updated_model = active_model.update(self.db).await?;

        Ok(Task::from(updated_model))
    }

    /// Deletes a task by its ID.
    ///
    /// Deleting a task never touches its owning user.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(&self, id: u32) -> Result<Task, TaskServiceError> {
        let task_to_delete = task::Entity::find_by_id(id as i32)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let task_copy = Task::from(task_to_delete.clone());
        task::Entity::delete_by_id(id as i32).exec(self.db).await?;
        Ok(task_copy)
    }
}
