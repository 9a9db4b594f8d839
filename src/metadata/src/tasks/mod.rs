pub mod provider_impl;

use async_trait::async_trait;
pub use common::entities::Task;
pub use common::entities::UpdateTaskRequest;
pub use provider_impl::ProviderImpl;

use crate::Result;

#[async_trait]
pub trait Provider: Sync + Send {
    /// Linear scan over the whole collection, there is no index by project.
    async fn list_by_project(&self, project_id: &str) -> Result<Vec<Task>>;
    async fn create(&self, req: CreateTask) -> Result<Task>;
    /// `project_id` is never changed by an update.
    async fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Option<Task>>;
    async fn delete(&self, id: &str) -> Result<bool>;
    /// Removes every task of the project. Always rewrites the file.
    async fn delete_by_project(&self, project_id: &str) -> Result<()>;
}

/// Task creation input, `project_id` comes from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub project_id: String,
    pub title: String,
    pub completed: bool,
}
