use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use tasklist_server::entities::{task, user};
use tasklist_server::task::{TaskService, TaskServiceError};
use testcontainers_modules::{postgres, testcontainers};

mod common;

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let container = common::setup_container().await?;
    let db = common::setup_db(&container).await?;
    Ok(TestContext { db, container })
}

/// Test helper to create a user and return its ID.
async fn create_test_user(db: &DatabaseConnection, name: &str) -> u32 {
    let user = user::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    };
    let created = user.insert(db).await.expect("Failed to create user");
    created.id as u32
}

/// Test helper to create a task directly through the entity and return its ID.
async fn create_test_task(db: &DatabaseConnection, text: &str, owner_id: u32) -> u32 {
    let task = task::ActiveModel {
        text: ActiveValue::Set(text.to_string()),
        completed: ActiveValue::Set(false),
        add_by_admin: ActiveValue::Set(false),
        owner_id: ActiveValue::Set(owner_id as i32),
        ..Default::default()
    };
    let created = task.insert(db).await.expect("Failed to create task");
    created.id as u32
}

#[tokio::test]
async fn can_create_task_for_existing_owner() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_service = TaskService::new(&state.db);

    let created = task_service
        .create_task("buy milk".to_string(), false, false, owner_id)
        .await
        .expect("Failed to create task");

    let expected = tasklist_server::task::Task::new(
        created.id(), // The ID is generated, so we use the created task's ID
        "buy milk".to_string(),
        false,
        false,
        owner_id,
    );
    assert_eq!(created, expected);
}

#[tokio::test]
async fn creating_task_with_missing_owner_inserts_nothing() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let result = task_service
        .create_task("buy milk".to_string(), false, false, 999)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::OwnerNotFound(id)) if id == 999
    ));

    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to list tasks");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn get_task_by_id_expands_owner_to_full_user() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_id = create_test_task(&state.db, "water plants", owner_id).await;
    let task_service = TaskService::new(&state.db);

    let fetched = task_service
        .get_task_by_id(task_id)
        .await
        .expect("Failed to get task");

    assert_eq!(fetched.task().text(), "water plants");
    assert_eq!(fetched.owner().id(), owner_id);
    assert_eq!(fetched.owner().name(), "Alice");
}

#[tokio::test]
async fn get_all_tasks_expands_every_owner() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    create_test_task(&state.db, "first", owner_id).await;
    create_test_task(&state.db, "second", owner_id).await;
    let task_service = TaskService::new(&state.db);

    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to list tasks");

    assert_eq!(tasks.len(), 2);
    for task_with_owner in &tasks {
        assert_eq!(task_with_owner.owner().name(), "Alice");
    }
}

#[tokio::test]
async fn update_replaces_fields_but_never_owner() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_id = create_test_task(&state.db, "initial text", owner_id).await;
    let task_service = TaskService::new(&state.db);

    let updated = task_service
        .update_task(task_id, "updated text".to_string(), true, true)
        .await
        .expect("Failed to update task");

    assert_eq!(updated.text(), "updated text");
    assert!(updated.completed());
    assert!(updated.add_by_admin());
    assert_eq!(updated.owner_id(), owner_id);
}

#[tokio::test]
async fn updating_missing_task_is_not_found_and_mutates_nothing() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_id = create_test_task(&state.db, "untouched", owner_id).await;
    let task_service = TaskService::new(&state.db);

    let result = task_service
        .update_task(999, "changed".to_string(), true, true)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::TaskNotFound(id)) if id == 999
    ));

    let existing = task_service
        .get_task_by_id(task_id)
        .await
        .expect("Failed to get task");
    assert_eq!(existing.task().text(), "untouched");
    assert!(!existing.task().completed());
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_id = create_test_task(&state.db, "short-lived", owner_id).await;
    let task_service = TaskService::new(&state.db);

    let deleted = task_service
        .delete_task_by_id(task_id)
        .await
        .expect("Failed to delete task");
    assert_eq!(deleted.id(), task_id);

    let result = task_service.get_task_by_id(task_id).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::TaskNotFound(id)) if id == task_id
    ));
}

#[tokio::test]
async fn deleting_task_leaves_its_owner_intact() {
    let state = setup().await.expect("Failed to setup test context");
    let owner_id = create_test_user(&state.db, "Alice").await;
    let task_id = create_test_task(&state.db, "doomed", owner_id).await;
    let task_service = TaskService::new(&state.db);

    task_service
        .delete_task_by_id(task_id)
        .await
        .expect("Failed to delete task");

    let owner = tasklist_server::user::UserService::new(&state.db)
        .get_user_by_id(owner_id)
        .await
        .expect("Owner should still exist");
    assert_eq!(owner.name(), "Alice");
}
