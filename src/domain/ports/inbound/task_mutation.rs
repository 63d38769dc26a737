use async_trait::async_trait;

use crate::domain::{
    models::{EmployeeId, TaskId, TaskRemoval, TaskStatusChange},
    EngineError,
};

/// Inbound port for task status mutations.
///
/// The single path through which a task's status may change. Every write
/// triggers re-derivation of the owning project's status, so the
/// project-level invariant cannot drift no matter which endpoint called.
#[async_trait]
pub trait TaskMutationService: Send + Sync + 'static {
    /// Set a task's status and cascade the derived project status.
    ///
    /// `new_status` is the wire value (`not_started`, `in_progress`,
    /// `completed`, `blocked`); anything else is `InvalidStatusValue`.
    /// Authorization is the caller's responsibility; `actor` is recorded
    /// for traceability only.
    async fn set_task_status(
        &self,
        task_id: TaskId,
        new_status: &str,
        actor: EmployeeId,
    ) -> Result<TaskStatusChange, EngineError>;

    /// Delete a task and recompute the owning project's status from the
    /// remaining tasks.
    ///
    /// Tolerates the owning project having already been deleted; that
    /// case yields `TaskRemoval { project: None }`.
    async fn remove_task(&self, task_id: TaskId) -> Result<TaskRemoval, EngineError>;
}
