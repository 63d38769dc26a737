use serde::Serialize;
use time::Date;

use super::{DayTotal, ProjectId, TaskId};

/// Per-task slice of a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTotal {
    pub task_id: TaskId,
    pub task_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub total: DayTotal,
    pub session_count: usize,
    /// One of the counted sessions is still running; its share of the
    /// total was computed live.
    pub has_active_session: bool,
}

/// An employee's work time for one calendar day, grouped by task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: Date,
    pub tasks: Vec<TaskTotal>,
    pub total: DayTotal,
    pub session_count: usize,
    pub active_session: bool,
}

/// Per-day subtotal inside a range summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySubtotal {
    pub date: Date,
    pub total: DayTotal,
    pub session_count: usize,
}

/// An employee's work time over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    pub from: Date,
    pub to: Date,
    pub days: Vec<DaySubtotal>,
    pub tasks: Vec<TaskTotal>,
    pub total: DayTotal,
}
