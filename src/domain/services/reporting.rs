use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use time::Date;

use crate::domain::{
    models::{
        DailySummary, DaySubtotal, DayTotal, EmployeeId, ProjectId, RangeSummary, SessionDetail,
        SessionId, TaskId, TaskTotal, WorkSession,
    },
    ports::{
        inbound::ReportingService,
        outbound::{Clock, ProjectStore, SessionStore, TaskStore},
    },
    EngineError,
};

/// Implementation of the ReportingService inbound port.
///
/// Pure read side: aggregates persisted sessions into per-task and
/// per-day totals, counting a still-active session with its live elapsed
/// time. Never writes, so it can run alongside the session manager.
pub struct DailySummaryComputer<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> DailySummaryComputer<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }
}

impl<S, C> DailySummaryComputer<S, C>
where
    S: ProjectStore + TaskStore + SessionStore,
    C: Clock,
{
    /// Group sessions by task and sum their durations, resolving task and
    /// project names once per distinct task.
    async fn task_totals(&self, sessions: &[WorkSession]) -> Result<Vec<TaskTotal>, EngineError> {
        let now = self.clock.now();

        // A closure here trips rustc's higher-ranked lifetime inference once
        // the caller is wrapped by `tracing::instrument`; a fn item does not.
        fn task_id_of(s: &WorkSession) -> TaskId {
            s.task_id
        }
        let mut names: HashMap<TaskId, (String, ProjectId, String)> = HashMap::new();
        for task_id in sessions.iter().map(task_id_of).unique() {
            let task = self.store.get_task(task_id).await?;
            let (task_name, project_id) = match task {
                Some(t) => (t.name, t.project_id),
                // Session of a task deleted since; keep the row readable.
                None => (task_id.to_string(), ProjectId::new(0)),
            };
            let project_name = match self.store.get_project(project_id).await? {
                Some(p) => p.name,
                None => project_id.to_string(),
            };
            names.insert(task_id, (task_name, project_id, project_name));
        }

        let mut totals: Vec<TaskTotal> = sessions
            .iter()
            .into_group_map_by(|s| s.task_id)
            .into_iter()
            .map(|(task_id, group)| {
                let seconds: i64 = group.iter().map(|s| s.seconds_at(now)).sum();
                let has_active = group.iter().any(|s| s.is_active);
                let (task_name, project_id, project_name) = names
                    .get(&task_id)
                    .cloned()
                    .unwrap_or_else(|| (task_id.to_string(), ProjectId::new(0), String::new()));
                TaskTotal {
                    task_id,
                    task_name,
                    project_id,
                    project_name,
                    total: DayTotal::from_seconds(seconds),
                    session_count: group.len(),
                    has_active_session: has_active,
                }
            })
            .collect();
        totals.sort_by_key(|t| t.task_id);
        Ok(totals)
    }
}

#[async_trait]
impl<S, C> ReportingService for DailySummaryComputer<S, C>
where
    S: ProjectStore + TaskStore + SessionStore,
    C: Clock,
{
    #[tracing::instrument(name = "daily_summary", skip(self))]
    async fn daily_summary(
        &self,
        employee_id: EmployeeId,
        date: Option<Date>,
    ) -> Result<DailySummary, EngineError> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let now = self.clock.now();

        let sessions = self.store.list_for_date(employee_id, date).await?;
        let tasks = self.task_totals(&sessions).await?;
        let total_seconds: i64 = sessions.iter().map(|s| s.seconds_at(now)).sum();

        Ok(DailySummary {
            date,
            total: DayTotal::from_seconds(total_seconds),
            session_count: sessions.len(),
            active_session: sessions.iter().any(|s| s.is_active),
            tasks,
        })
    }

    #[tracing::instrument(name = "range_summary", skip(self))]
    async fn range_summary(
        &self,
        employee_id: EmployeeId,
        range: (Date, Date),
    ) -> Result<RangeSummary, EngineError> {
        let (from, to) = range;
        if from > to {
            return Err(EngineError::InvalidDateRange);
        }
        let now = self.clock.now();

        let sessions = self.store.list_for_range(employee_id, range).await?;
        let tasks = self.task_totals(&sessions).await?;

        let mut days: Vec<DaySubtotal> = sessions
            .iter()
            .into_group_map_by(|s| s.work_date)
            .into_iter()
            .map(|(date, group)| DaySubtotal {
                date,
                total: DayTotal::from_seconds(group.iter().map(|s| s.seconds_at(now)).sum()),
                session_count: group.len(),
            })
            .collect();
        days.sort_by_key(|d| d.date);

        let total_seconds: i64 = sessions.iter().map(|s| s.seconds_at(now)).sum();

        Ok(RangeSummary {
            from,
            to,
            days,
            tasks,
            total: DayTotal::from_seconds(total_seconds),
        })
    }

    #[tracing::instrument(name = "session_detail", skip(self))]
    async fn session_detail(
        &self,
        session_id: SessionId,
        employee_id: EmployeeId,
    ) -> Result<SessionDetail, EngineError> {
        let session = self
            .store
            .get_session(session_id)
            .await?
            .filter(|s| s.employee_id == employee_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;

        let now = self.clock.now();
        let duration = DayTotal::from_seconds(session.seconds_at(now));

        let same_day_seconds: i64 = self
            .store
            .list_for_date(employee_id, session.work_date)
            .await?
            .iter()
            .filter(|s| s.task_id == session.task_id)
            .map(|s| s.seconds_at(now))
            .sum();

        let task_name = match self.store.get_task(session.task_id).await? {
            Some(t) => t.name,
            None => session.task_id.to_string(),
        };
        let project_name = match self.store.get_project(session.project_id).await? {
            Some(p) => p.name,
            None => session.project_id.to_string(),
        };

        Ok(SessionDetail {
            session,
            task_name,
            project_name,
            duration,
            same_day_total: DayTotal::from_seconds(same_day_seconds),
        })
    }
}
