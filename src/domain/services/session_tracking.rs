use std::sync::Arc;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};

use crate::domain::{
    models::{
        ActiveSessionInfo, DayTotal, EmployeeId, NewWorkSession, ProjectId, ProjectStatus,
        SessionEdit, SessionId, SessionTimes, TaskId, TaskStatus, ToggleOutcome, WorkSession,
    },
    ports::{
        inbound::SessionTrackingService,
        outbound::{Clock, ProjectStore, SessionStart, SessionStore, TaskStore},
    },
    time_math, EngineError,
};

use super::TaskMutationGateway;

/// Implementation of the SessionTrackingService inbound port.
///
/// Enforces the single-active-session rule per employee and delegates the
/// status side effects of a starting session to the task mutation
/// gateway. Duration math lives in `time_math`; all clock reads go
/// through the injected `Clock`.
pub struct TimeSessionManager<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    gateway: TaskMutationGateway<S>,
}

impl<S, C> TimeSessionManager<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let gateway = TaskMutationGateway::new(store.clone());
        Self {
            store,
            clock,
            gateway,
        }
    }
}

impl<S, C> TimeSessionManager<S, C>
where
    S: ProjectStore + TaskStore + SessionStore,
    C: Clock,
{
    /// Stop an active session: record the end time, fix the duration,
    /// clear the active flag.
    async fn stop(&self, mut session: WorkSession) -> Result<WorkSession, EngineError> {
        let now = self.clock.now();
        session.end_time = Some(now);
        session.duration_seconds = time_math::seconds_between(session.start_time, now);
        session.is_active = false;
        self.store.put_session(&session).await?;

        tracing::debug!(
            session = %session.id,
            seconds = session.duration_seconds,
            "session stopped"
        );
        Ok(session)
    }

    /// Cumulative recorded seconds for (employee, task) on one date.
    /// Active sessions contribute their stored 0 here, matching the
    /// stopped-work totals shown next to a toggle response.
    async fn same_day_total(
        &self,
        employee_id: EmployeeId,
        task_id: TaskId,
        work_date: Date,
    ) -> Result<DayTotal, EngineError> {
        let sessions = self.store.list_for_date(employee_id, work_date).await?;
        let seconds = sessions
            .iter()
            .filter(|s| s.task_id == task_id)
            .map(|s| s.duration_seconds)
            .sum();
        Ok(DayTotal::from_seconds(seconds))
    }

    /// Describe the session blocking a new start. Store lookups that fail
    /// here fall back to placeholders; the conflict itself is the answer.
    async fn conflict_info(&self, other: WorkSession) -> ActiveSessionInfo {
        let task_name = match self.store.get_task(other.task_id).await {
            Ok(Some(task)) => task.name,
            _ => other.task_id.to_string(),
        };
        let project_name = match self.store.get_project(other.project_id).await {
            Ok(Some(project)) => project.name,
            _ => other.project_id.to_string(),
        };
        ActiveSessionInfo {
            session_id: other.id,
            task_id: other.task_id,
            task_name,
            project_id: other.project_id,
            project_name,
            started_at: other.start_time,
        }
    }
}

#[async_trait]
impl<S, C> SessionTrackingService for TimeSessionManager<S, C>
where
    S: ProjectStore + TaskStore + SessionStore,
    C: Clock,
{
    #[tracing::instrument(name = "toggle_session", skip(self))]
    async fn toggle(
        &self,
        employee_id: EmployeeId,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> Result<ToggleOutcome, EngineError> {
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or(EngineError::ProjectNotFound(project_id))?;
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or(EngineError::TaskNotFound(task_id))?;

        if task.project_id != project_id {
            return Err(EngineError::ProjectMismatch {
                task: task_id,
                expected: project_id,
                actual: task.project_id,
            });
        }
        if task.assigned_employee != Some(employee_id) {
            return Err(EngineError::TaskNotAssigned {
                task: task_id,
                employee: employee_id,
            });
        }

        let today = self.clock.today();

        // Same-task toggle: an active session for this task today is
        // stopped, not rejected.
        if let Some(active) = self
            .store
            .active_for_task(employee_id, task_id, today)
            .await?
        {
            let session = self.stop(active).await?;
            let same_day_total = self
                .same_day_total(employee_id, task_id, session.work_date)
                .await?;
            return Ok(ToggleOutcome::Stopped {
                session,
                same_day_total,
            });
        }

        let task_was_not_started = task.status == TaskStatus::NotStarted;
        let project_was_not_started = project.status == ProjectStatus::NotStarted;

        // The no-other-active-session check and the insert are one atomic
        // store operation; two racing toggles cannot both pass it.
        let new = NewWorkSession {
            employee_id,
            task_id,
            project_id,
            work_date: today,
            start_time: self.clock.now(),
        };
        let session = match self.store.create_if_idle(&new).await? {
            SessionStart::Created(session) => session,
            SessionStart::ActiveExists(other) => {
                let info = self.conflict_info(other).await;
                tracing::warn!(
                    blocking_task = %info.task_name,
                    blocking_project = %info.project_name,
                    "toggle rejected, another session is active"
                );
                return Err(EngineError::ConcurrentSessionConflict(info));
            }
        };

        let (task, project) = self.gateway.on_session_started(task_id).await?;
        tracing::debug!(session = %session.id, task = %task.id, "session started");

        Ok(ToggleOutcome::Started {
            session,
            project_auto_started: project_was_not_started
                && project.status == ProjectStatus::InProgress,
            task_auto_started: task_was_not_started && task.status == TaskStatus::InProgress,
        })
    }

    #[tracing::instrument(name = "edit_session", skip(self, new_start, new_end))]
    async fn edit(
        &self,
        session_id: SessionId,
        employee_id: EmployeeId,
        new_start: Option<OffsetDateTime>,
        new_end: Option<OffsetDateTime>,
    ) -> Result<SessionEdit, EngineError> {
        let mut session = self
            .store
            .get_session(session_id)
            .await?
            .filter(|s| s.employee_id == employee_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;

        if new_start.is_none() && new_end.is_none() {
            return Err(EngineError::NothingToEdit);
        }
        if session.work_date > self.clock.today() {
            return Err(EngineError::FutureEditRejected(session.work_date));
        }

        let old_values = SessionTimes::of(&session);

        // Effective times: supplied value or the existing one. An active
        // session keeps its open end unless an end is supplied.
        let effective_start = new_start.unwrap_or(session.start_time);
        let effective_end = new_end.or(session.end_time);

        if let Some(end) = effective_end {
            if end <= effective_start {
                return Err(EngineError::InvalidTimeRange {
                    start: effective_start,
                    end,
                });
            }
        }

        session.start_time = effective_start;
        session.end_time = effective_end;
        if let Some(end) = session.end_time {
            session.duration_seconds = time_math::seconds_between(session.start_time, end);
        }
        self.store.put_session(&session).await?;

        let same_day_total = self
            .same_day_total(employee_id, session.task_id, session.work_date)
            .await?;

        Ok(SessionEdit {
            new_values: SessionTimes::of(&session),
            old_values,
            session,
            same_day_total,
        })
    }
}
