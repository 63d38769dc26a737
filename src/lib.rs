//! Work session tracking and project status derivation engine.
//!
//! The stateful core of a project/estimate/timesheet backend: it derives
//! a project's status from its tasks, enforces that an employee has at
//! most one running work session at a time, and aggregates recorded and
//! live durations for reporting. Everything else (HTTP, auth, storage,
//! notifications) is a boundary collaborator behind the ports in
//! [`domain::ports`].
//!
//! Layout follows the hexagonal split: pure domain logic and models in
//! [`domain`], inbound use-case traits and outbound store/clock traits in
//! [`domain::ports`], service implementations in [`domain::services`],
//! and an in-memory store in [`store`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use worklog_engine::domain::models::{EmployeeId, ProjectId, TaskId};
//! use worklog_engine::domain::ports::inbound::SessionTrackingService;
//! use worklog_engine::domain::ports::outbound::SystemClock;
//! use worklog_engine::domain::services::TimeSessionManager;
//! use worklog_engine::store::InMemoryStore;
//!
//! # async fn run() -> Result<(), worklog_engine::domain::EngineError> {
//! let store = Arc::new(InMemoryStore::new());
//! let manager = TimeSessionManager::new(store.clone(), Arc::new(SystemClock));
//! let outcome = manager
//!     .toggle(EmployeeId::new(1), TaskId::new(10), ProjectId::new(2))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod store;

pub use domain::{EngineError, StoreError};
