use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::domain::time_math;

use super::{EmployeeId, ProjectId, SessionId, TaskId};

/// A single contiguous start/stop interval an employee spends on one task
/// on one calendar day.
///
/// `duration_seconds` is only meaningful once the session is stopped;
/// while `is_active` it stays 0 and callers compute elapsed time live.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    pub id: SessionId,
    pub employee_id: EmployeeId,
    pub task_id: TaskId,
    pub project_id: ProjectId,
    /// Assigned at creation, never edited afterwards.
    pub work_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    pub duration_seconds: i64,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl WorkSession {
    /// Seconds accumulated by this session: the recorded duration for a
    /// stopped session, or the live elapsed time for an active one.
    pub fn seconds_at(&self, now: OffsetDateTime) -> i64 {
        if self.is_active {
            time_math::live_elapsed_seconds(self.start_time, now)
        } else {
            self.duration_seconds
        }
    }
}

/// Data for creating a new active session.
#[derive(Debug, Clone)]
pub struct NewWorkSession {
    pub employee_id: EmployeeId,
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub work_date: Date,
    pub start_time: OffsetDateTime,
}

/// A duration total, carried both raw and formatted (HH:MM:SS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub seconds: i64,
    pub formatted: String,
}

impl DayTotal {
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            formatted: time_math::format_hms(seconds),
        }
    }
}

/// Outcome of a toggle request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ToggleOutcome {
    Started {
        session: WorkSession,
        /// The project was NotStarted and got bumped to InProgress.
        project_auto_started: bool,
        /// The task was NotStarted and got bumped to InProgress.
        task_auto_started: bool,
    },
    Stopped {
        session: WorkSession,
        /// Cumulative total for this (employee, task) on the session's day.
        same_day_total: DayTotal,
    },
}

/// Details of the session blocking a new start, surfaced to the caller so
/// it can say "stop that one first".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionInfo {
    pub session_id: SessionId,
    pub task_id: TaskId,
    pub task_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

/// Snapshot of a session's time fields, used to report before/after on
/// edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTimes {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    pub duration_seconds: i64,
    pub duration_formatted: String,
}

impl SessionTimes {
    pub fn of(session: &WorkSession) -> Self {
        Self {
            start_time: session.start_time,
            end_time: session.end_time,
            duration_seconds: session.duration_seconds,
            duration_formatted: time_math::format_hms(session.duration_seconds),
        }
    }
}

/// Result of a session edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEdit {
    pub session: WorkSession,
    pub old_values: SessionTimes,
    pub new_values: SessionTimes,
    pub same_day_total: DayTotal,
}

/// A single session with its live duration and the same-day task total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub session: WorkSession,
    pub task_name: String,
    pub project_name: String,
    pub duration: DayTotal,
    pub same_day_total: DayTotal,
}
