use crate::domain::repository::TaskRepository;
use crate::domain::task::{CreateTask, Task, TaskId, UpdateTask};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TaskService: Send + Sync + 'static {
    async fn create(&self, input: CreateTask) -> Result<Task>;
    async fn list(&self) -> Result<Vec<Task>>;
    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>>;
    async fn delete(&self, id: TaskId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TaskServiceImpl<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TaskRepository> TaskService for TaskServiceImpl<R> {
    async fn create(&self, input: CreateTask) -> Result<Task> {
        let task = self.repo.create(input).await?;
        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>> { self.repo.list().await }

    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        let updated = self.repo.update(id, input).await?;
        if updated.is_none() {
            tracing::debug!(%id, "update matched no task");
        }
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let deleted = self.repo.delete(id).await?;
        tracing::debug!(%id, deleted, "task delete");
        Ok(deleted)
    }
}
