//! Work session store port (outbound).

use async_trait::async_trait;
use time::Date;

use crate::domain::models::{EmployeeId, NewWorkSession, SessionId, TaskId, WorkSession};
use crate::domain::StoreError;

/// Outcome of the conditional insert that guards the single-active-session
/// rule.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStart {
    /// No active session existed; the new one was created.
    Created(WorkSession),
    /// The employee already had an active session; nothing was inserted.
    ActiveExists(WorkSession),
}

/// Transactional CRUD over work session rows.
///
/// Session rows are written only by the session manager. Implementations
/// must make `create_if_idle` atomic: the "no active session exists"
/// check and the insert may not interleave with another `create_if_idle`
/// for the same employee (SQL stores take a row lock or use a conditional
/// insert; the in-memory store holds one write lock across both steps).
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn get_session(&self, id: SessionId) -> Result<Option<WorkSession>, StoreError>;

    async fn put_session(&self, session: &WorkSession) -> Result<(), StoreError>;

    /// The active session for (employee, task, work date), if any. Used to
    /// decide whether a toggle stops or starts.
    async fn active_for_task(
        &self,
        employee_id: EmployeeId,
        task_id: TaskId,
        work_date: Date,
    ) -> Result<Option<WorkSession>, StoreError>;

    /// Atomically create a new active session unless the employee already
    /// has one anywhere (any task, any project, any date).
    async fn create_if_idle(&self, new: &NewWorkSession) -> Result<SessionStart, StoreError>;

    /// All sessions for an employee on one work date.
    async fn list_for_date(
        &self,
        employee_id: EmployeeId,
        work_date: Date,
    ) -> Result<Vec<WorkSession>, StoreError>;

    /// All sessions for an employee in an inclusive date range.
    async fn list_for_range(
        &self,
        employee_id: EmployeeId,
        range: (Date, Date),
    ) -> Result<Vec<WorkSession>, StoreError>;
}
