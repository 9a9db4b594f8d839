use std::sync::Arc;

use common::entities::CreateProjectRequest;
use common::entities::Project;
use common::entities::UpdateProjectRequest;
use common::types::OptionalProperty;
use metadata::projects::Provider as ProjectsProvider;
use metadata::tasks::Provider as TasksProvider;
use tracing::debug;

use crate::error::ValidationError;
use crate::PlatformError;
use crate::Result;

const NAME_REQUIRED: &str = "Name is required";

fn project_not_found() -> PlatformError {
    PlatformError::NotFound("project not found".to_string())
}

pub struct Projects {
    prov: Arc<dyn ProjectsProvider>,
    tasks: Arc<dyn TasksProvider>,
}

impl Projects {
    pub fn new(prov: Arc<dyn ProjectsProvider>, tasks: Arc<dyn TasksProvider>) -> Self {
        Self { prov, tasks }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.prov.list().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Project> {
        self.prov
            .get_by_id(id)
            .await?
            .ok_or_else(project_not_found)
    }

    pub async fn create(&self, req: CreateProjectRequest) -> Result<Project> {
        let mut verr = ValidationError::new();
        if req.name.is_empty() {
            verr.push("name", NAME_REQUIRED);
        }
        verr.result()?;

        Ok(self.prov.create(req).await?)
    }

    pub async fn update(&self, id: &str, req: UpdateProjectRequest) -> Result<Project> {
        let mut verr = ValidationError::new();
        if let OptionalProperty::Some(name) = &req.name {
            if name.is_empty() {
                verr.push("name", NAME_REQUIRED);
            }
        }
        verr.result()?;

        self.prov
            .update(id, req)
            .await?
            .ok_or_else(project_not_found)
    }

    /// Deletes the project, then every task that belongs to it. The two steps
    /// are not atomic.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.prov.delete(id).await? {
            return Err(project_not_found());
        }

        self.tasks.delete_by_project(id).await?;
        debug!("project {id} deleted with its tasks");

        Ok(())
    }
}
