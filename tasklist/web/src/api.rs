//! HTTP client for the task store API.
//!
//! One function per endpoint, no retries and no timeouts; callers decide
//! what to do with a failed call.

use serde::{Deserialize, Serialize};

/// Base URL of the task store API.
const API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// A task as returned by the API.
///
/// `owner` arrives as a bare identifier from create/update and as an
/// embedded user record from list/get.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: u32,
    pub text: String,
    pub completed: bool,
    pub add_by_admin: bool,
    pub owner: OwnerRef,
}

/// The owner reference in either of its wire shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(u32),
    Expanded(UserDto),
}

/// A user record embedded in an expanded task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDto {
    pub id: u32,
    pub name: String,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub text: String,
    pub completed: bool,
    pub add_by_admin: bool,
    pub owner_id: u32,
}

/// Payload for updating a task. Every mutable field is sent; the server
/// replaces them wholesale.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub text: String,
    pub completed: bool,
    pub add_by_admin: bool,
}

/// Acknowledgment returned after deleting a task.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeleteAck {
    pub message: String,
}

/// Thin client over the task endpoints.
#[derive(Debug, Clone)]
pub struct TaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for TaskApi {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl TaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the whole task collection, owners expanded.
    pub async fn get_all_tasks(&self) -> reqwest::Result<Vec<TaskDto>> {
        self.client
            .get(format!("{}/tasks", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Creates a task and returns the stored record with its generated id.
    pub async fn create_task(&self, task: &CreateTask) -> reqwest::Result<TaskDto> {
        self.client
            .post(format!("{}/tasks", self.base_url))
            .json(task)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Replaces a task's mutable fields and returns the post-update record.
    pub async fn update_task(&self, id: u32, task: &UpdateTask) -> reqwest::Result<TaskDto> {
        self.client
            .put(format!("{}/tasks/{}", self.base_url, id))
            .json(task)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Deletes a task by id.
    pub async fn delete_task(&self, id: u32) -> reqwest::Result<DeleteAck> {
        self.client
            .delete(format!("{}/tasks/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
