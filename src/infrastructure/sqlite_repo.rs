use std::{str::FromStr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TaskRepository,
    task::{CreateTask, Task, TaskId, UpdateTask},
};

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTaskRepository {
    /// Opens the pool. An in-memory database lives inside a single
    /// connection, so that connection is pinned for the life of the pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {database_url}"))?
            .create_if_missing(true);
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTask) -> Result<Task> {
        let result = sqlx::query("INSERT INTO tasks (text, completed) VALUES (?1, ?2)")
            .bind(&input.text)
            .bind(input.completed)
            .execute(&*self.pool)
            .await?;
        Ok(Task { id: TaskId(result.last_insert_rowid()), text: input.text, completed: input.completed })
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let row = sqlx::query("SELECT id, text, completed FROM tasks WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_task).transpose()
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query("SELECT id, text, completed FROM tasks ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        sqlx::query(
            "UPDATE tasks SET text = COALESCE(?2, text), completed = COALESCE(?3, completed) WHERE id = ?1",
        )
        .bind(id.0)
        .bind(input.text)
        .bind(input.completed)
        .execute(&*self.pool)
        .await?;
        self.get(id).await
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_task(row: SqliteRow) -> Result<Task> {
    Ok(Task {
        id: TaskId(row.try_get("id")?),
        text: row.try_get("text")?,
        completed: row.try_get("completed")?,
    })
}
