use crate::api::{CreateTask, TaskApi, UpdateTask};
use crate::state::{self, TaskItem, TaskListEvent, TaskListState};
use dioxus::prelude::*;

/// Interactive task list backed by the task store API.
///
/// Fetches the collection once on mount and reconciles local state from each
/// call's own result; it never re-fetches after a mutation and never observes
/// changes made by other clients. Failed calls are logged and leave local
/// state in its pre-call shape.
#[component]
pub fn TaskList(title: String, owner_id: u32) -> Element {
    let api = use_hook(TaskApi::default);
    let mut tasks = use_signal(TaskListState::new);
    let mut new_task = use_signal(String::new);

    // Load the collection once on mount.
    {
        let api = api.clone();
        use_effect(move || {
            let api = api.clone();
            spawn(async move {
                match api.get_all_tasks().await {
                    Ok(list) => {
                        let items = list.into_iter().map(TaskItem::from).collect();
                        let next = tasks.peek().apply(TaskListEvent::Loaded(items));
                        tasks.set(next);
                    }
                    Err(err) => tracing::error!("Failed to load tasks: {}", err),
                }
            });
        });
    }

    let on_add = {
        let api = api.clone();
        move |event: FormEvent| {
            event.prevent_default();
            let Some(text) = state::prepare_new_task_text(new_task.peek().as_str()) else {
                return;
            };
            let payload = CreateTask {
                text,
                completed: false,
                add_by_admin: false,
                owner_id,
            };
            let api = api.clone();
            spawn(async move {
                // Only a response carrying a generated id is appended; a
                // malformed body fails deserialization and changes nothing.
                match api.create_task(&payload).await {
                    Ok(created) => {
                        let next = tasks.peek().apply(TaskListEvent::Added(created.into()));
                        tasks.set(next);
                        new_task.set(String::new());
                    }
                    Err(err) => tracing::error!("Failed to create task: {}", err),
                }
            });
        }
    };

    rsx! {
        div { class: "todo-container",
            h2 { "{title}" }
            form { onsubmit: on_add,
                input {
                    r#type: "text",
                    class: "todo-input",
                    placeholder: "Add a new task",
                    value: "{new_task}",
                    oninput: move |event| new_task.set(event.value()),
                }
                button { r#type: "submit", class: "add-button", "Add" }
            }
            ul { class: "todo-list",
                if tasks().is_empty() {
                    li { class: "empty", "No tasks yet" }
                }
                for task in tasks().iter().cloned().collect::<Vec<_>>() {
                    li {
                        key: "{task.id}",
                        class: if task.completed { "completed" } else { "" },
                        input {
                            r#type: "checkbox",
                            checked: task.completed,
                            onchange: {
                                let api = api.clone();
                                let task = task.clone();
                                move |_| {
                                    // The locally flipped copy drives both the
                                    // request and the state update; the server's
                                    // returned document is ignored.
                                    let flipped = TaskItem {
                                        completed: !task.completed,
                                        ..task.clone()
                                    };
                                    let request = UpdateTask {
                                        text: flipped.text.clone(),
                                        completed: flipped.completed,
                                        add_by_admin: flipped.add_by_admin,
                                    };
                                    let api = api.clone();
                                    spawn(async move {
                                        match api.update_task(flipped.id, &request).await {
                                            Ok(_) => {
                                                let next = tasks
                                                    .peek()
                                                    .apply(TaskListEvent::Toggled(flipped));
                                                tasks.set(next);
                                            }
                                            Err(err) => {
                                                tracing::error!("Failed to update task: {}", err)
                                            }
                                        }
                                    });
                                }
                            },
                        }
                        if task.add_by_admin {
                            span {
                                class: "admin-icon",
                                title: "Added by an administrator",
                                "★"
                            }
                        }
                        span { class: "todo-text", "{task.text}" }
                        button {
                            class: "delete-button",
                            onclick: {
                                let api = api.clone();
                                let id = task.id;
                                move |_| {
                                    let api = api.clone();
                                    spawn(async move {
                                        match api.delete_task(id).await {
                                            Ok(_) => {
                                                let next = tasks
                                                    .peek()
                                                    .apply(TaskListEvent::Removed(id));
                                                tasks.set(next);
                                            }
                                            Err(err) => {
                                                tracing::error!("Failed to delete task: {}", err)
                                            }
                                        }
                                    });
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
