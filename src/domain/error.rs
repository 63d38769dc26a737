use thiserror::Error;
use time::{Date, OffsetDateTime};

use crate::domain::models::{ActiveSessionInfo, EmployeeId, ProjectId, SessionId, TaskId};

/// Infrastructure failure in the backing store.
///
/// These are not business-rule violations; they propagate to the caller
/// unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store constraint violated: {0}")]
    Constraint(String),
}

/// Errors produced by engine operations.
///
/// All variants except `Store` are expected, recoverable-by-caller
/// conditions; the API layer translates them into user-facing responses.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("task {task} is not assigned to employee {employee}")]
    TaskNotAssigned { task: TaskId, employee: EmployeeId },
    #[error("task {task} does not belong to project {expected}")]
    ProjectMismatch {
        task: TaskId,
        expected: ProjectId,
        actual: ProjectId,
    },
    #[error("invalid status value: {0}")]
    InvalidStatusValue(String),
    #[error(
        "an active session already exists for task '{}' in project '{}'",
        .0.task_name,
        .0.project_name
    )]
    ConcurrentSessionConflict(ActiveSessionInfo),
    #[error("end time must be after start time")]
    InvalidTimeRange {
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
    #[error("cannot edit a session dated in the future ({0})")]
    FutureEditRejected(Date),
    #[error("at least one of start or end time must be provided")]
    NothingToEdit,
    #[error("invalid date range")]
    InvalidDateRange,
    #[error(transparent)]
    Store(#[from] StoreError),
}
