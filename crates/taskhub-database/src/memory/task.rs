//! In-memory task store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use taskhub_core::result::AppResult;
use taskhub_core::types::{TaskId, UserId};
use taskhub_entity::task::{CreateTask, Task, UpdateTask};

use crate::store::TaskStore;

#[derive(Debug, Default)]
struct InnerState {
    next_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

/// Task store backed by a map keyed by task id.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryTaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_for_owner(&self, owner: UserId) -> AppResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| t.is_owned_by(owner))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).filter(|t| t.is_owned_by(owner)).cloned())
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let task = Task {
            id: TaskId::new(state.next_id),
            owner_id: Some(data.owner_id),
            title: data.title.clone(),
            description: data.description.clone(),
            completed: data.completed,
            created_at: Utc::now(),
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_for_owner(
        &self,
        id: TaskId,
        owner: UserId,
        data: &UpdateTask,
    ) -> AppResult<Option<Task>> {
        let mut state = self.state.write().await;
        let Some(task) = state.tasks.get_mut(&id).filter(|t| t.is_owned_by(owner)) else {
            return Ok(None);
        };
        task.title = data.title.clone();
        task.description = data.description.clone();
        task.completed = data.completed;
        Ok(Some(task.clone()))
    }

    async fn delete_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state.tasks.get(&id).is_some_and(|t| t.is_owned_by(owner));
        if owned {
            state.tasks.remove(&id);
        }
        Ok(owned)
    }
}
