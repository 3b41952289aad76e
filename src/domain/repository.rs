use async_trait::async_trait;
use super::task::{CreateTask, Task, TaskId, UpdateTask};

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTask) -> anyhow::Result<Task>;
    async fn get(&self, id: TaskId) -> anyhow::Result<Option<Task>>;
    /// All rows in storage order.
    async fn list(&self) -> anyhow::Result<Vec<Task>>;
    /// Applies the update without checking that `id` exists; `None` means
    /// the re-read found no row.
    async fn update(&self, id: TaskId, input: UpdateTask) -> anyhow::Result<Option<Task>>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: TaskId) -> anyhow::Result<bool>;
}
