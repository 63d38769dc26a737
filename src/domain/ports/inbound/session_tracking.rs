use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{EmployeeId, ProjectId, SessionEdit, SessionId, TaskId, ToggleOutcome},
    EngineError,
};

/// Inbound port for the work session state machine.
///
/// Per employee the machine is either Idle (no active session) or
/// Active(task, session), globally across all projects.
#[async_trait]
pub trait SessionTrackingService: Send + Sync + 'static {
    /// Start or stop the timer for (employee, task).
    ///
    /// Stops the session if one is already active for this task today;
    /// otherwise starts a new one, provided the employee has no active
    /// session elsewhere (`ConcurrentSessionConflict` if they do).
    /// Starting a session bumps a NotStarted task and project to
    /// InProgress through the task mutation gateway.
    async fn toggle(
        &self,
        employee_id: EmployeeId,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> Result<ToggleOutcome, EngineError>;

    /// Adjust a session's start and/or end time.
    ///
    /// The work date itself is immutable, and sessions dated after today
    /// cannot be edited. The stored duration is recomputed from the
    /// effective times.
    async fn edit(
        &self,
        session_id: SessionId,
        employee_id: EmployeeId,
        new_start: Option<OffsetDateTime>,
        new_end: Option<OffsetDateTime>,
    ) -> Result<SessionEdit, EngineError>;
}
