use std::sync::Arc;

use common::entities::CreateTaskRequest;
use common::entities::Task;
use common::entities::UpdateTaskRequest;
use common::types::OptionalProperty;
use metadata::tasks::Provider as TasksProvider;

use crate::error::ValidationError;
use crate::PlatformError;
use crate::Result;

const TITLE_REQUIRED: &str = "Title is required";

fn task_not_found() -> PlatformError {
    PlatformError::NotFound("task not found".to_string())
}

pub struct Tasks {
    prov: Arc<dyn TasksProvider>,
}

impl Tasks {
    pub fn new(prov: Arc<dyn TasksProvider>) -> Self {
        Self { prov }
    }

    pub async fn list_by_project(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self.prov.list_by_project(project_id).await?)
    }

    // The project isn't looked up: tasks may reference a missing project.
    pub async fn create(&self, project_id: &str, req: CreateTaskRequest) -> Result<Task> {
        let mut verr = ValidationError::new();
        if req.title.is_empty() {
            verr.push("title", TITLE_REQUIRED);
        }
        verr.result()?;

        let md_req = metadata::tasks::CreateTask {
            project_id: project_id.to_string(),
            title: req.title,
            completed: req.completed,
        };

        Ok(self.prov.create(md_req).await?)
    }

    pub async fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Task> {
        let mut verr = ValidationError::new();
        if let OptionalProperty::Some(title) = &req.title {
            if title.is_empty() {
                verr.push("title", TITLE_REQUIRED);
            }
        }
        verr.result()?;

        self.prov
            .update(id, req)
            .await?
            .ok_or_else(task_not_found)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.prov.delete(id).await? {
            return Err(task_not_found());
        }

        Ok(())
    }
}
