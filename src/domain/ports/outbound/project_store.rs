//! Project store port (outbound).

use async_trait::async_trait;

use crate::domain::models::{Project, ProjectId};
use crate::domain::StoreError;

/// Transactional CRUD over project rows.
///
/// Project rows are written only by the task mutation gateway; no other
/// component mutates them.
#[async_trait]
pub trait ProjectStore: Send + Sync + 'static {
    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    async fn put_project(&self, project: &Project) -> Result<(), StoreError>;
}
