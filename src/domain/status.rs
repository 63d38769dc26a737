//! Project status derivation.
//!
//! A project's status is a pure function of its current status and the
//! statuses of its child tasks. Every mutation path (status update, timer
//! start, task removal) re-evaluates this function instead of carrying
//! its own copy of the cascade rules.

use crate::domain::models::{ProjectStatus, TaskStatus};

/// Derive a project's status from its current status and the statuses of
/// all its tasks.
///
/// Precedence, first match wins:
/// 1. sticky states (`OnHold`, `Cancelled`) are never overridden;
/// 2. no tasks at all means `NotStarted`;
/// 3. any `InProgress` task forces `InProgress`;
/// 4. all tasks `Completed` forces `Completed`;
/// 5. a mix with at least one started task bumps a `NotStarted` project
///    to `InProgress` but leaves anything else alone;
/// 6. otherwise every task is `NotStarted`, so the project is too.
pub fn derive_status(current: ProjectStatus, tasks: &[TaskStatus]) -> ProjectStatus {
    if current.is_sticky() {
        return current;
    }
    if tasks.is_empty() {
        return ProjectStatus::NotStarted;
    }
    if tasks.iter().any(|s| *s == TaskStatus::InProgress) {
        return ProjectStatus::InProgress;
    }
    if tasks.iter().all(|s| *s == TaskStatus::Completed) {
        return ProjectStatus::Completed;
    }
    if tasks.iter().any(|s| *s != TaskStatus::NotStarted) {
        return if current == ProjectStatus::NotStarted {
            ProjectStatus::InProgress
        } else {
            current
        };
    }
    ProjectStatus::NotStarted
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProjectStatus as P;
    use TaskStatus as T;

    #[test]
    fn sticky_states_always_win() {
        for current in [P::OnHold, P::Cancelled] {
            assert_eq!(derive_status(current, &[]), current);
            assert_eq!(derive_status(current, &[T::InProgress]), current);
            assert_eq!(derive_status(current, &[T::Completed]), current);
            assert_eq!(
                derive_status(current, &[T::Blocked, T::NotStarted]),
                current
            );
        }
    }

    #[test]
    fn empty_task_set_resets_to_not_started() {
        assert_eq!(derive_status(P::InProgress, &[]), P::NotStarted);
        assert_eq!(derive_status(P::Completed, &[]), P::NotStarted);
        assert_eq!(derive_status(P::NotStarted, &[]), P::NotStarted);
    }

    #[test]
    fn any_in_progress_task_forces_in_progress() {
        assert_eq!(
            derive_status(P::NotStarted, &[T::Completed, T::InProgress]),
            P::InProgress
        );
        assert_eq!(
            derive_status(P::Completed, &[T::InProgress, T::Completed]),
            P::InProgress
        );
    }

    #[test]
    fn all_completed_forces_completed() {
        assert_eq!(
            derive_status(P::InProgress, &[T::Completed, T::Completed]),
            P::Completed
        );
        assert_eq!(derive_status(P::NotStarted, &[T::Completed]), P::Completed);
    }

    #[test]
    fn partially_started_mix_bumps_only_not_started_projects() {
        // Blocked/Completed mix, no InProgress, not all Completed.
        let mix = [T::Blocked, T::NotStarted, T::Completed];
        assert_eq!(derive_status(P::NotStarted, &mix), P::InProgress);
        assert_eq!(derive_status(P::InProgress, &mix), P::InProgress);
        assert_eq!(derive_status(P::Completed, &mix), P::Completed);
    }

    #[test]
    fn all_not_started_means_not_started() {
        assert_eq!(
            derive_status(P::InProgress, &[T::NotStarted, T::NotStarted]),
            P::NotStarted
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let inputs = [
            (P::NotStarted, vec![T::InProgress, T::Blocked]),
            (P::InProgress, vec![T::Completed, T::Completed]),
            (P::OnHold, vec![T::InProgress]),
            (P::Completed, vec![]),
        ];
        for (current, tasks) in inputs {
            let first = derive_status(current, &tasks);
            assert_eq!(derive_status(current, &tasks), first);
            // A second application from the derived state is stable too.
            assert_eq!(derive_status(first, &tasks), first);
        }
    }
}
