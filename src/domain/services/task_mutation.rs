use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{
        EmployeeId, Project, ProjectStatus, Task, TaskId, TaskRemoval, TaskStatus,
        TaskStatusChange,
    },
    ports::{
        inbound::TaskMutationService,
        outbound::{ProjectStore, TaskStore},
    },
    status, EngineError,
};

/// Implementation of the TaskMutationService inbound port.
///
/// Owns the task-write + project-derivation sequence. Every path that
/// touches a task status (direct edit, timer start, removal) flows
/// through `cascade_project_status`, so the derivation rules live in
/// exactly one place (`status::derive_status`).
pub struct TaskMutationGateway<S> {
    store: Arc<S>,
}

impl<S> TaskMutationGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ProjectStore + TaskStore> TaskMutationGateway<S> {
    /// Re-derive the project's status from its current task set and
    /// persist it if it moved. Returns the updated project and whether it
    /// changed.
    async fn cascade_project_status(
        &self,
        mut project: Project,
    ) -> Result<(Project, bool), EngineError> {
        let tasks = self.store.list_tasks_by_project(project.id).await?;
        let statuses: Vec<TaskStatus> = tasks.iter().map(|t| t.status).collect();
        let derived = status::derive_status(project.status, &statuses);

        if derived == project.status {
            return Ok((project, false));
        }

        tracing::info!(
            project = %project.id,
            from = %project.status,
            to = %derived,
            "project status auto-updated"
        );
        project.status = derived;
        self.store.put_project(&project).await?;
        Ok((project, true))
    }

    /// Write a task's status and run the project cascade.
    async fn apply_task_status(
        &self,
        mut task: Task,
        new_status: TaskStatus,
    ) -> Result<TaskStatusChange, EngineError> {
        let project = self
            .store
            .get_project(task.project_id)
            .await?
            .ok_or(EngineError::ProjectNotFound(task.project_id))?;

        let old_status = task.status;
        task.status = new_status;
        self.store.put_task(&task).await?;

        let (project, changed) = self.cascade_project_status(project).await?;

        Ok(TaskStatusChange {
            task,
            old_status,
            project_status: project.status,
            project_status_changed: changed,
        })
    }

    /// Session-start side effects: a NotStarted task moves to InProgress
    /// (cascading the project), and a project that somehow stayed
    /// NotStarted is bumped along with it.
    ///
    /// Called by the session manager when a timer starts.
    pub(crate) async fn on_session_started(
        &self,
        task_id: TaskId,
    ) -> Result<(Task, Project), EngineError> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or(EngineError::TaskNotFound(task_id))?;

        let task = if task.status == TaskStatus::NotStarted {
            self.apply_task_status(task, TaskStatus::InProgress)
                .await?
                .task
        } else {
            task
        };

        let mut project = self
            .store
            .get_project(task.project_id)
            .await?
            .ok_or(EngineError::ProjectNotFound(task.project_id))?;

        // Covers a task that was already past NotStarted while the
        // project never left it.
        if project.status == ProjectStatus::NotStarted {
            tracing::info!(project = %project.id, "project started by first work session");
            project.status = ProjectStatus::InProgress;
            self.store.put_project(&project).await?;
        }

        Ok((task, project))
    }
}

#[async_trait]
impl<S: ProjectStore + TaskStore> TaskMutationService for TaskMutationGateway<S> {
    #[tracing::instrument(name = "set_task_status", skip(self), fields(actor = %actor))]
    async fn set_task_status(
        &self,
        task_id: TaskId,
        new_status: &str,
        actor: EmployeeId,
    ) -> Result<TaskStatusChange, EngineError> {
        let new_status = TaskStatus::from_str(new_status)
            .map_err(|_| EngineError::InvalidStatusValue(new_status.to_string()))?;

        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or(EngineError::TaskNotFound(task_id))?;

        self.apply_task_status(task, new_status).await
    }

    #[tracing::instrument(name = "remove_task", skip(self))]
    async fn remove_task(&self, task_id: TaskId) -> Result<TaskRemoval, EngineError> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or(EngineError::TaskNotFound(task_id))?;

        self.store.delete_task(task_id).await?;

        // The project may already be gone; recomputing against nothing is
        // a no-op, not an error.
        let Some(project) = self.store.get_project(task.project_id).await? else {
            tracing::debug!(task = %task_id, "owning project already deleted, skipping cascade");
            return Ok(TaskRemoval { project: None });
        };

        let (project, _) = self.cascade_project_status(project).await?;
        Ok(TaskRemoval {
            project: Some(project),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn setup() -> (Arc<InMemoryStore>, TaskMutationGateway<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let gateway = TaskMutationGateway::new(store.clone());
        (store, gateway)
    }

    #[tokio::test]
    async fn completing_all_tasks_completes_the_project_in_any_order() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("Home Renovation", manager);
        let a = store.add_task(project.id, "Demolition", Some(manager));
        let b = store.add_task(project.id, "Framing", Some(manager));
        let c = store.add_task(project.id, "Painting", Some(manager));

        for (i, task) in [b.id, a.id, c.id].into_iter().enumerate() {
            let change = gateway
                .set_task_status(task, "completed", manager)
                .await
                .unwrap();
            let expected = if i == 2 {
                ProjectStatus::Completed
            } else {
                ProjectStatus::InProgress
            };
            assert_eq!(change.project_status, expected);
        }
    }

    #[tokio::test]
    async fn any_in_progress_task_forces_project_in_progress() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("Office Fitout", manager);
        let a = store.add_task(project.id, "Survey", Some(manager));
        store.add_task(project.id, "Order materials", Some(manager));

        let change = gateway
            .set_task_status(a.id, "in_progress", manager)
            .await
            .unwrap();

        assert!(change.project_status_changed);
        assert_eq!(change.project_status, ProjectStatus::InProgress);
        assert_eq!(change.old_status, TaskStatus::NotStarted);
    }

    #[tokio::test]
    async fn on_hold_project_never_moves_automatically() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("Paused Build", manager);
        let a = store.add_task(project.id, "Task A", Some(manager));
        let b = store.add_task(project.id, "Task B", Some(manager));
        store.set_project_status(project.id, ProjectStatus::OnHold);

        let change = gateway
            .set_task_status(a.id, "completed", manager)
            .await
            .unwrap();
        assert!(!change.project_status_changed);
        assert_eq!(change.project_status, ProjectStatus::OnHold);

        let change = gateway
            .set_task_status(b.id, "completed", manager)
            .await
            .unwrap();
        assert_eq!(change.project_status, ProjectStatus::OnHold);

        let removal = gateway.remove_task(a.id).await.unwrap();
        assert_eq!(removal.project.unwrap().status, ProjectStatus::OnHold);
    }

    #[tokio::test]
    async fn removing_the_last_task_resets_the_project() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("Single Task Project", manager);
        let a = store.add_task(project.id, "Only Task", Some(manager));

        gateway
            .set_task_status(a.id, "in_progress", manager)
            .await
            .unwrap();

        let removal = gateway.remove_task(a.id).await.unwrap();
        assert_eq!(removal.project.unwrap().status, ProjectStatus::NotStarted);
    }

    #[tokio::test]
    async fn removing_a_task_of_a_deleted_project_is_a_noop() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("Doomed", manager);
        let a = store.add_task(project.id, "Orphan", Some(manager));
        store.remove_project(project.id);

        let removal = gateway.remove_task(a.id).await.unwrap();
        assert!(removal.project.is_none());
    }

    #[tokio::test]
    async fn unknown_status_value_is_rejected() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("P", manager);
        let a = store.add_task(project.id, "T", Some(manager));

        let err = gateway
            .set_task_status(a.id, "done", manager)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStatusValue(v) if v == "done"));

        // The task is untouched.
        let task = store.get_task(a.id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::NotStarted);
    }

    #[tokio::test]
    async fn missing_task_is_reported() {
        let (_, gateway) = setup();
        let err = gateway
            .set_task_status(TaskId::new(999), "completed", EmployeeId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::TaskNotFound(id) if id == TaskId::new(999)));
    }

    #[tokio::test]
    async fn unchanged_derivation_does_not_flag_a_project_change() {
        let (store, gateway) = setup();
        let manager = EmployeeId::new(1);
        let project = store.add_project("P", manager);
        let a = store.add_task(project.id, "A", Some(manager));
        let b = store.add_task(project.id, "B", Some(manager));

        gateway
            .set_task_status(a.id, "in_progress", manager)
            .await
            .unwrap();
        let change = gateway
            .set_task_status(b.id, "in_progress", manager)
            .await
            .unwrap();

        assert!(!change.project_status_changed);
        assert_eq!(change.project_status, ProjectStatus::InProgress);
    }
}
