use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use common::types::OptionalProperty;
use tracing::debug;

use crate::projects::CreateProjectRequest;
use crate::projects::Project;
use crate::projects::Provider;
use crate::projects::UpdateProjectRequest;
use crate::store::new_id;
use crate::store::next_updated_at;
use crate::store::JsonStore;
use crate::store::Mutation;
use crate::Result;

pub struct ProviderImpl {
    store: JsonStore<Project>,
}

impl ProviderImpl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn with_serialized_writes(self, enabled: bool) -> Self {
        Self {
            store: self.store.with_serialized_writes(enabled),
        }
    }
}

#[async_trait]
impl Provider for ProviderImpl {
    async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.store.load().await)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Project>> {
        let projects = self.store.load().await;

        Ok(projects.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, req: CreateProjectRequest) -> Result<Project> {
        let created_at = Utc::now();
        let project = Project {
            id: new_id(),
            name: req.name,
            description: req.description,
            created_at,
            updated_at: created_at,
        };

        let ret = project.clone();
        self.store
            .mutate(move |projects| {
                projects.push(project);
                Mutation::Commit(())
            })
            .await?;
        debug!("project {} created", ret.id);

        Ok(ret)
    }

    async fn update(&self, id: &str, req: UpdateProjectRequest) -> Result<Option<Project>> {
        self.store
            .mutate(move |projects| {
                let project = match projects.iter_mut().find(|p| p.id == id) {
                    None => return Mutation::Discard(None),
                    Some(project) => project,
                };

                if let OptionalProperty::Some(name) = req.name {
                    project.name = name;
                }
                if let OptionalProperty::Some(description) = req.description {
                    project.description = Some(description);
                }
                project.updated_at = next_updated_at(project.updated_at);

                Mutation::Commit(Some(project.clone()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.store
            .mutate(move |projects| {
                let len = projects.len();
                projects.retain(|p| p.id != id);
                if projects.len() == len {
                    Mutation::Discard(false)
                } else {
                    Mutation::Commit(true)
                }
            })
            .await
    }
}
