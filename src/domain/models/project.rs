use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{EmployeeId, ProjectId};

/// Status of a project, derived from its tasks except for the sticky
/// manual states.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    /// Sticky states are set manually and never overwritten by automatic
    /// derivation.
    pub fn is_sticky(&self) -> bool {
        matches!(self, ProjectStatus::OnHold | ProjectStatus::Cancelled)
    }
}

/// A project owning zero or more tasks.
///
/// `status` is mutated only through the task mutation gateway; everything
/// else is immutable as far as this engine is concerned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub created_by: EmployeeId,
}

impl Project {
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        created_by: impl Into<EmployeeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ProjectStatus::NotStarted,
            created_by: created_by.into(),
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_from_wire_values() {
        assert_eq!(
            ProjectStatus::from_str("not_started").unwrap(),
            ProjectStatus::NotStarted
        );
        assert_eq!(
            ProjectStatus::from_str("on_hold").unwrap(),
            ProjectStatus::OnHold
        );
        assert!(ProjectStatus::from_str("paused").is_err());
    }

    #[test]
    fn sticky_states() {
        assert!(ProjectStatus::OnHold.is_sticky());
        assert!(ProjectStatus::Cancelled.is_sticky());
        assert!(!ProjectStatus::InProgress.is_sticky());
        assert!(!ProjectStatus::NotStarted.is_sticky());
        assert!(!ProjectStatus::Completed.is_sticky());
    }
}
