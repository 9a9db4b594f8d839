use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use common::types::OptionalProperty;
use tracing::debug;

use crate::store::new_id;
use crate::store::next_updated_at;
use crate::store::JsonStore;
use crate::store::Mutation;
use crate::tasks::CreateTask;
use crate::tasks::Provider;
use crate::tasks::Task;
use crate::tasks::UpdateTaskRequest;
use crate::Result;

pub struct ProviderImpl {
    store: JsonStore<Task>,
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
    async fn list_by_project(&self, project_id: &str) -> Result<Vec<Task>> {
        let tasks = self.store.load().await;

        Ok(tasks
            .into_iter()
            .filter(|t| t.project_id == project_id)
            .collect())
    }

    async fn create(&self, req: CreateTask) -> Result<Task> {
        let created_at = Utc::now();
        let task = Task {
            id: new_id(),
            project_id: req.project_id,
            title: req.title,
            completed: req.completed,
            created_at,
            updated_at: created_at,
        };

        let ret = task.clone();
        self.store
            .mutate(move |tasks| {
                tasks.push(task);
                Mutation::Commit(())
            })
            .await?;
        debug!("task {} created in project {}", ret.id, ret.project_id);

        Ok(ret)
    }

    async fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Option<Task>> {
        self.store
            .mutate(move |tasks| {
                let task = match tasks.iter_mut().find(|t| t.id == id) {
                    None => return Mutation::Discard(None),
                    Some(task) => task,
                };

                if let OptionalProperty::Some(title) = req.title {
                    task.title = title;
                }
                if let OptionalProperty::Some(completed) = req.completed {
                    task.completed = completed;
                }
                task.updated_at = next_updated_at(task.updated_at);

                Mutation::Commit(Some(task.clone()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.store
            .mutate(move |tasks| {
                let len = tasks.len();
                tasks.retain(|t| t.id != id);
                if tasks.len() == len {
                    Mutation::Discard(false)
                } else {
                    Mutation::Commit(true)
                }
            })
            .await
    }

    async fn delete_by_project(&self, project_id: &str) -> Result<()> {
        let removed = self
            .store
            .mutate(move |tasks| {
                let len = tasks.len();
                tasks.retain(|t| t.project_id != project_id);
                Mutation::Commit(len - tasks.len())
            })
            .await?;
        debug!("removed {} tasks of project {}", removed, project_id);

        Ok(())
    }
}
