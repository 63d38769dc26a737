//! Task store port (outbound).

use async_trait::async_trait;

use crate::domain::models::{ProjectId, Task, TaskId};
use crate::domain::StoreError;

/// Transactional CRUD over task rows.
///
/// Task rows are written only by the task mutation gateway.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    async fn put_task(&self, task: &Task) -> Result<(), StoreError>;

    /// All tasks belonging to a project, the input of status derivation.
    async fn list_tasks_by_project(&self, project_id: ProjectId)
        -> Result<Vec<Task>, StoreError>;

    /// Remove a task row. Returns whether a row was actually deleted.
    async fn delete_task(&self, id: TaskId) -> Result<bool, StoreError>;
}
