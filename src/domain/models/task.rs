use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{EmployeeId, Project, ProjectId, ProjectStatus, TaskId};

/// Status of a single task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

/// A task belonging to exactly one project for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub status: TaskStatus,
    pub assigned_employee: Option<EmployeeId>,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        project_id: impl Into<ProjectId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            status: TaskStatus::NotStarted,
            assigned_employee: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn assigned_to(mut self, employee: impl Into<EmployeeId>) -> Self {
        self.assigned_employee = Some(employee.into());
        self
    }
}

/// Result of a task status update, including the project-side cascade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusChange {
    pub task: Task,
    pub old_status: TaskStatus,
    pub project_status: ProjectStatus,
    /// Whether the derivation actually moved the project status, used by
    /// callers to report "project auto-updated" messaging.
    pub project_status_changed: bool,
}

/// Result of a task removal: the owning project with its recomputed
/// status, or `None` when the project itself was already gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRemoval {
    pub project: Option<Project>,
}
