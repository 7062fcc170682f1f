//! Task operations. Every call is scoped to `ctx.user_id`; a task owned
//! by someone else behaves exactly like a task that does not exist.

use std::sync::Arc;

use tracing::info;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::TaskId;
use taskhub_database::store::TaskStore;
use taskhub_entity::task::{CreateTask, TITLE_MAX_LENGTH, Task, UpdateTask};

use crate::context::RequestContext;
use crate::form::FormErrors;

/// Submitted task fields after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    /// Trimmed title, `None` if blank.
    pub title: Option<String>,
    /// Trimmed description, `None` if blank.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
}

impl TaskInput {
    /// Normalize raw form values: trim and treat blank strings as absent.
    pub fn from_form(title: Option<&str>, description: Option<&str>, completed: bool) -> Self {
        Self {
            title: normalize(title),
            description: normalize(description),
            completed,
        }
    }

    /// Check field limits.
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FormErrors::new();
        if let Some(title) = &self.title {
            let len = title.chars().count();
            if len > TITLE_MAX_LENGTH {
                errors.add(
                    "title",
                    format!(
                        "Poskrbite, da bo ta vrednost imela največ {TITLE_MAX_LENGTH} znakov (trenutno jih ima {len})."
                    ),
                );
            }
        }
        errors.into_result()
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The listing page: the user's tasks and how many are still open.
#[derive(Debug, Clone)]
pub struct TaskOverview {
    /// Tasks, oldest first.
    pub tasks: Vec<Task>,
    /// Number of tasks not yet completed.
    pub incomplete: usize,
}

/// Handles task CRUD for the requesting user.
#[derive(Clone)]
pub struct TaskService {
    /// Task persistence.
    tasks: Arc<dyn TaskStore>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService").finish()
    }
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Lists the user's tasks.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<TaskOverview> {
        let tasks = self.tasks.list_for_owner(ctx.user_id).await?;
        let incomplete = tasks.iter().filter(|t| !t.completed).count();
        Ok(TaskOverview { tasks, incomplete })
    }

    /// Gets one of the user's tasks.
    pub async fn get(&self, ctx: &RequestContext, id: TaskId) -> AppResult<Task> {
        self.tasks
            .find_for_owner(id, ctx.user_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a task owned by the requesting user.
    pub async fn create(&self, ctx: &RequestContext, input: TaskInput) -> AppResult<Task> {
        input.validate()?;

        let task = self
            .tasks
            .create(&CreateTask {
                owner_id: ctx.user_id,
                title: input.title,
                description: input.description,
                completed: input.completed,
            })
            .await?;

        info!(user_id = %ctx.user_id, task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Replaces the editable fields of one of the user's tasks.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        input: TaskInput,
    ) -> AppResult<Task> {
        input.validate()?;

        let task = self
            .tasks
            .update_for_owner(
                id,
                ctx.user_id,
                &UpdateTask {
                    title: input.title,
                    description: input.description,
                    completed: input.completed,
                },
            )
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(user_id = %ctx.user_id, task_id = %id, "Task updated");
        Ok(task)
    }

    /// Deletes one of the user's tasks.
    pub async fn delete(&self, ctx: &RequestContext, id: TaskId) -> AppResult<()> {
        if !self.tasks.delete_for_owner(id, ctx.user_id).await? {
            return Err(not_found(id));
        }
        info!(user_id = %ctx.user_id, task_id = %id, "Task deleted");
        Ok(())
    }
}

fn not_found(id: TaskId) -> AppError {
    AppError::not_found(format!("Task {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::error::ErrorKind;
    use taskhub_core::types::UserId;
    use taskhub_database::memory::MemoryTaskStore;
    use uuid::Uuid;

    fn ctx(user: i64) -> RequestContext {
        RequestContext::new(UserId::new(user), format!("user{user}"), Uuid::new_v4())
    }

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskStore::new()))
    }

    fn input(title: &str) -> TaskInput {
        TaskInput::from_form(Some(title), None, false)
    }

    #[test]
    fn test_form_values_are_trimmed_and_blank_is_absent() {
        let input = TaskInput::from_form(Some("  Kupi mleko "), Some("   "), true);
        assert_eq!(input.title.as_deref(), Some("Kupi mleko"));
        assert_eq!(input.description, None);
        assert!(input.completed);
    }

    #[test]
    fn test_title_limit_counts_characters() {
        assert!(input(&"č".repeat(50)).validate().is_ok());

        let err = input(&"a".repeat(51)).validate().unwrap_err();
        let errors = err.source_as::<FormErrors>().expect("form errors");
        assert_eq!(
            errors.field("title"),
            ["Poskrbite, da bo ta vrednost imela največ 50 znakov (trenutno jih ima 51)."]
        );
    }

    #[tokio::test]
    async fn test_owner_is_requesting_user() {
        let service = service();
        let task = service.create(&ctx(7), input("moje")).await.expect("create");
        assert_eq!(task.owner_id, Some(UserId::new(7)));
    }

    #[tokio::test]
    async fn test_list_counts_incomplete() {
        let service = service();
        let alice = ctx(1);
        service.create(&alice, input("a")).await.expect("create");
        service
            .create(&alice, TaskInput::from_form(Some("b"), None, true))
            .await
            .expect("create");
        service.create(&ctx(2), input("tuje")).await.expect("create");

        let overview = service.list(&alice).await.expect("list");
        assert_eq!(overview.tasks.len(), 2);
        assert_eq!(overview.incomplete, 1);
    }

    #[tokio::test]
    async fn test_foreign_task_is_not_found() {
        let service = service();
        let task = service.create(&ctx(1), input("skrivno")).await.expect("create");
        let bob = ctx(2);

        assert_eq!(
            service.get(&bob, task.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service
                .update(&bob, task.id, input("ukradeno"))
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(&bob, task.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );

        let unchanged = service.get(&ctx(1), task.id).await.expect("still there");
        assert_eq!(unchanged.title.as_deref(), Some("skrivno"));
    }

    #[tokio::test]
    async fn test_unchecked_box_clears_completion() {
        let service = service();
        let alice = ctx(1);
        let task = service
            .create(&alice, TaskInput::from_form(Some("x"), None, true))
            .await
            .expect("create");

        let updated = service
            .update(&alice, task.id, TaskInput::from_form(Some("x"), None, false))
            .await
            .expect("update");
        assert!(!updated.completed);
        assert_eq!(updated.created_at, task.created_at);
    }
}
