pub mod provider_impl;

use async_trait::async_trait;
pub use common::entities::CreateProjectRequest;
pub use common::entities::Project;
pub use common::entities::UpdateProjectRequest;
pub use provider_impl::ProviderImpl;

use crate::Result;

/// Project repository. Absence is reported as `None`/`false`, only storage
/// failures are errors.
#[async_trait]
pub trait Provider: Sync + Send {
    async fn list(&self) -> Result<Vec<Project>>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Project>>;
    async fn create(&self, req: CreateProjectRequest) -> Result<Project>;
    async fn update(&self, id: &str, req: UpdateProjectRequest) -> Result<Option<Project>>;
    /// Doesn't touch the project's tasks.
    async fn delete(&self, id: &str) -> Result<bool>;
}
