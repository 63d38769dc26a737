//! In-memory store implementation.
//!
//! Backs the engine's outbound store ports with `RwLock`-guarded maps.
//! Serves as the test double and as an embeddable store for callers that
//! do not need durable persistence. `create_if_idle` does its scan and
//! insert under a single write lock, which is what makes the
//! single-active-session rule hold under concurrent toggles.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::Date;

use crate::domain::models::{
    EmployeeId, NewWorkSession, Project, ProjectId, ProjectStatus, SessionId, Task, TaskId,
    WorkSession,
};
use crate::domain::ports::outbound::{
    ProjectStore, SessionStart, SessionStore, TaskStore,
};
use crate::domain::StoreError;

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    sessions: HashMap<SessionId, WorkSession>,
    next_project_id: i64,
    next_task_id: i64,
    next_session_id: i64,
}

/// Store backed by in-memory maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project. For tests and embedders; the engine itself never
    /// creates projects.
    pub fn add_project(&self, name: impl Into<String>, created_by: EmployeeId) -> Project {
        let mut inner = self.inner.write().unwrap();
        inner.next_project_id += 1;
        let project = Project::new(inner.next_project_id, name, created_by);
        inner.projects.insert(project.id, project.clone());
        project
    }

    /// Seed a task under a project.
    pub fn add_task(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        assigned_employee: Option<EmployeeId>,
    ) -> Task {
        let mut inner = self.inner.write().unwrap();
        inner.next_task_id += 1;
        let mut task = Task::new(inner.next_task_id, project_id, name);
        task.assigned_employee = assigned_employee;
        inner.tasks.insert(task.id, task.clone());
        task
    }

    /// Manually set a project status, e.g. putting it on hold. Stands in
    /// for the administrative endpoints outside this engine.
    pub fn set_project_status(&self, id: ProjectId, status: ProjectStatus) {
        let mut inner = self.inner.write().unwrap();
        if let Some(project) = inner.projects.get_mut(&id) {
            project.status = status;
        }
    }

    /// Drop a project row, leaving any tasks dangling.
    pub fn remove_project(&self, id: ProjectId) {
        self.inner.write().unwrap().projects.remove(&id);
    }

    /// All sessions of an employee, ordered by start time. For test
    /// assertions.
    pub fn sessions_for(&self, employee_id: EmployeeId) -> Vec<WorkSession> {
        let inner = self.inner.read().unwrap();
        let mut sessions: Vec<WorkSession> = inner
            .sessions
            .values()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.start_time);
        sessions
    }

    /// Number of active sessions an employee currently has. The engine's
    /// central invariant keeps this at 0 or 1.
    pub fn active_session_count(&self, employee_id: EmployeeId) -> usize {
        self.inner
            .read()
            .unwrap()
            .sessions
            .values()
            .filter(|s| s.employee_id == employee_id && s.is_active)
            .count()
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.inner.read().unwrap().projects.get(&id).cloned())
    }

    async fn put_project(&self, project: &Project) -> Result<(), StoreError> {
        self.inner
            .write()
            .unwrap()
            .projects
            .insert(project.id, project.clone());
        Ok(())
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.inner.read().unwrap().tasks.get(&id).cloned())
    }

    async fn put_task(&self, task: &Task) -> Result<(), StoreError> {
        self.inner
            .write()
            .unwrap()
            .tasks
            .insert(task.id, task.clone());
        Ok(())
    }

    async fn list_tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn delete_task(&self, id: TaskId) -> Result<bool, StoreError> {
        Ok(self.inner.write().unwrap().tasks.remove(&id).is_some())
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn get_session(&self, id: SessionId) -> Result<Option<WorkSession>, StoreError> {
        Ok(self.inner.read().unwrap().sessions.get(&id).cloned())
    }

    async fn put_session(&self, session: &WorkSession) -> Result<(), StoreError> {
        self.inner
            .write()
            .unwrap()
            .sessions
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn active_for_task(
        &self,
        employee_id: EmployeeId,
        task_id: TaskId,
        work_date: Date,
    ) -> Result<Option<WorkSession>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .sessions
            .values()
            .find(|s| {
                s.employee_id == employee_id
                    && s.task_id == task_id
                    && s.work_date == work_date
                    && s.is_active
            })
            .cloned())
    }

    async fn create_if_idle(&self, new: &NewWorkSession) -> Result<SessionStart, StoreError> {
        // One write lock across the check and the insert; the exclusivity
        // contract of the port.
        let mut inner = self.inner.write().unwrap();

        if let Some(active) = inner
            .sessions
            .values()
            .find(|s| s.employee_id == new.employee_id && s.is_active)
        {
            return Ok(SessionStart::ActiveExists(active.clone()));
        }

        inner.next_session_id += 1;
        let session = WorkSession {
            id: SessionId::new(inner.next_session_id),
            employee_id: new.employee_id,
            task_id: new.task_id,
            project_id: new.project_id,
            work_date: new.work_date,
            start_time: new.start_time,
            end_time: None,
            duration_seconds: 0,
            is_active: true,
            created_at: new.start_time,
        };
        inner.sessions.insert(session.id, session.clone());
        Ok(SessionStart::Created(session))
    }

    async fn list_for_date(
        &self,
        employee_id: EmployeeId,
        work_date: Date,
    ) -> Result<Vec<WorkSession>, StoreError> {
        self.list_for_range(employee_id, (work_date, work_date))
            .await
    }

    async fn list_for_range(
        &self,
        employee_id: EmployeeId,
        range: (Date, Date),
    ) -> Result<Vec<WorkSession>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut sessions: Vec<WorkSession> = inner
            .sessions
            .values()
            .filter(|s| {
                s.employee_id == employee_id
                    && s.work_date >= range.0
                    && s.work_date <= range.1
            })
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.start_time);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn make_new_session(employee: i64, task: i64) -> NewWorkSession {
        NewWorkSession {
            employee_id: EmployeeId::new(employee),
            task_id: TaskId::new(task),
            project_id: ProjectId::new(1),
            work_date: date!(2025 - 11 - 20),
            start_time: datetime!(2025-11-20 09:00:00 UTC),
        }
    }

    #[tokio::test]
    async fn conditional_insert_rejects_a_second_active_session() {
        let store = InMemoryStore::new();

        let first = store.create_if_idle(&make_new_session(1, 1)).await.unwrap();
        let created = match first {
            SessionStart::Created(s) => s,
            other => panic!("expected Created, got {other:?}"),
        };

        // Different task, same employee: blocked.
        let second = store.create_if_idle(&make_new_session(1, 2)).await.unwrap();
        match second {
            SessionStart::ActiveExists(existing) => assert_eq!(existing.id, created.id),
            other => panic!("expected ActiveExists, got {other:?}"),
        }

        // Other employees are unaffected.
        let other = store.create_if_idle(&make_new_session(2, 2)).await.unwrap();
        assert!(matches!(other, SessionStart::Created(_)));
    }

    #[tokio::test]
    async fn stopped_sessions_free_the_slot() {
        let store = InMemoryStore::new();
        let mut session = match store.create_if_idle(&make_new_session(1, 1)).await.unwrap() {
            SessionStart::Created(s) => s,
            other => panic!("expected Created, got {other:?}"),
        };

        session.is_active = false;
        session.end_time = Some(datetime!(2025-11-20 10:00:00 UTC));
        session.duration_seconds = 3600;
        store.put_session(&session).await.unwrap();

        let next = store.create_if_idle(&make_new_session(1, 2)).await.unwrap();
        assert!(matches!(next, SessionStart::Created(_)));
        assert_eq!(store.active_session_count(EmployeeId::new(1)), 1);
    }

    #[tokio::test]
    async fn range_listing_is_inclusive_and_sorted() {
        let store = InMemoryStore::new();
        for (day, hour) in [(20, 9), (21, 8), (22, 10)] {
            let new = NewWorkSession {
                employee_id: EmployeeId::new(1),
                task_id: TaskId::new(1),
                project_id: ProjectId::new(1),
                work_date: Date::from_calendar_date(2025, time::Month::November, day).unwrap(),
                start_time: datetime!(2025-11-20 00:00:00 UTC)
                    + time::Duration::days(day as i64 - 20)
                    + time::Duration::hours(hour),
            };
            let mut session = match store.create_if_idle(&new).await.unwrap() {
                SessionStart::Created(s) => s,
                other => panic!("expected Created, got {other:?}"),
            };
            session.is_active = false;
            store.put_session(&session).await.unwrap();
        }

        let sessions = store
            .list_for_range(
                EmployeeId::new(1),
                (date!(2025 - 11 - 20), date!(2025 - 11 - 21)),
            )
            .await
            .unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].start_time < sessions[1].start_time);

        let single = store
            .list_for_date(EmployeeId::new(1), date!(2025 - 11 - 22))
            .await
            .unwrap();
        assert_eq!(single.len(), 1);
    }
}
