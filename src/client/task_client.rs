use crate::domain::task::{CreateTask, Task, TaskId, UpdateTask};

use super::api::TaskApi;

/// Open edit form for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSurface {
    pub id: TaskId,
    pub text: String,
}

/// Client-side view of the task list.
///
/// The cached list is never patched locally: every mutation is followed by
/// a full re-fetch. Network failures are logged and swallowed, leaving the
/// previous view in place.
pub struct TaskClient<A: TaskApi> {
    api: A,
    tasks: Vec<Task>,
    input: String,
    selected: Option<TaskId>,
    edit: Option<EditSurface>,
}

impl<A: TaskApi> TaskClient<A> {
    pub fn new(api: A) -> Self {
        Self { api, tasks: Vec::new(), input: String::new(), selected: None, edit: None }
    }

    pub fn tasks(&self) -> &[Task] { &self.tasks }

    pub fn task(&self, id: TaskId) -> Option<&Task> { self.tasks.iter().find(|t| t.id == id) }

    pub fn input(&self) -> &str { &self.input }

    pub fn input_mut(&mut self) -> &mut String { &mut self.input }

    pub fn selected(&self) -> Option<TaskId> { self.selected }

    pub fn edit(&self) -> Option<&EditSurface> { self.edit.as_ref() }

    pub fn edit_text_mut(&mut self) -> Option<&mut String> { self.edit.as_mut().map(|e| &mut e.text) }

    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(tasks) => {
                self.tasks = tasks;
                if let Some(id) = self.selected {
                    if self.task(id).is_none() { self.selected = None; }
                }
            }
            Err(err) => tracing::error!(error = %err, "fetching tasks failed"),
        }
    }

    /// Creates a task from the input line. Blank input sends nothing.
    pub async fn add(&mut self) {
        let text = self.input.trim();
        if text.is_empty() {
            return;
        }
        let input = CreateTask { text: text.to_string(), completed: false };
        match self.api.create(input).await {
            Ok(_) => {
                self.input.clear();
                self.refresh().await;
            }
            Err(err) => tracing::error!(error = %err, "adding task failed"),
        }
    }

    pub async fn toggle_completed(&mut self, id: TaskId) {
        let Some(current) = self.task(id).map(|t| t.completed) else { return };
        let change = UpdateTask { text: None, completed: Some(!current) };
        match self.api.update(id, change).await {
            Ok(_) => self.refresh().await,
            Err(err) => tracing::error!(error = %err, %id, "updating task failed"),
        }
    }

    /// Opens the edit surface pre-filled with the cached text. Returns false
    /// when the task is not in the current view.
    pub fn open_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.task(id) else { return false };
        self.edit = Some(EditSurface { id, text: task.text.clone() });
        true
    }

    pub fn cancel_edit(&mut self) { self.edit = None; }

    /// Saves the edit surface. An empty draft is ignored and the surface
    /// stays open; so does a failed request.
    pub async fn confirm_edit(&mut self) {
        let Some(edit) = self.edit.as_ref() else { return };
        if edit.text.is_empty() {
            return;
        }
        let (id, change) = (edit.id, UpdateTask { text: Some(edit.text.clone()), completed: None });
        match self.api.update(id, change).await {
            Ok(_) => {
                self.refresh().await;
                self.edit = None;
            }
            Err(err) => tracing::error!(error = %err, %id, "editing task failed"),
        }
    }

    pub async fn delete(&mut self, id: TaskId) {
        match self.api.delete(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => tracing::error!(error = %err, %id, "deleting task failed"),
        }
    }

    /// Selecting a task replaces any previous selection.
    pub fn select(&mut self, id: TaskId) { self.selected = Some(id); }

    pub fn clear_selection(&mut self) { self.selected = None; }
}
