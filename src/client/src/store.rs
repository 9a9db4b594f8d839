//! Client-side mirror of the server state.
//!
//! Every action issues exactly one request and reconciles the local state
//! from the response. Failures are never returned to the caller: the action
//! stores a fixed message in [`State::error`] instead. Nothing is retried.

use std::collections::HashMap;

use common::entities::CreateProjectRequest;
use common::entities::CreateTaskRequest;
use common::entities::Project;
use common::entities::Task;
use common::entities::UpdateProjectRequest;
use common::http::ApiErrorBody;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use tracing::warn;

use crate::error::ClientError;
use crate::error::Result;

const ERR_FETCH_PROJECTS: &str = "Failed to fetch projects";
const ERR_CREATE_PROJECT: &str = "Failed to create project";
const ERR_UPDATE_PROJECT: &str = "Failed to update project";
const ERR_DELETE_PROJECT: &str = "Failed to delete project";
const ERR_FETCH_TASKS: &str = "Failed to fetch tasks";
const ERR_CREATE_TASK: &str = "Failed to create task";
const ERR_UPDATE_TASK: &str = "Failed to update task";
const ERR_DELETE_TASK: &str = "Failed to delete task";

#[derive(Debug, Clone, Default)]
pub struct State {
    pub projects: Vec<Project>,
    /// Task lists keyed by project id, filled by `fetch_tasks`.
    pub tasks: HashMap<String, Vec<Task>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct ProjectStore {
    cl: Client,
    base_url: String,
    state: State,
}

impl ProjectStore {
    /// `base_url` points at the api root, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(cl: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            cl,
            base_url,
            state: State::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn tasks(&self, project_id: &str) -> &[Task] {
        self.state
            .tasks
            .get(project_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub async fn fetch_projects(&mut self) {
        self.begin_loading();
        let req = self.cl.get(self.url("/projects"));
        match json_response::<Vec<Project>>(req).await {
            Ok(projects) => {
                self.state.projects = projects;
                self.state.is_loading = false;
            }
            Err(err) => self.fail(ERR_FETCH_PROJECTS, err),
        }
    }

    pub async fn add_project(&mut self, input: CreateProjectRequest) {
        self.begin_loading();
        let req = self.cl.post(self.url("/projects")).json(&input);
        match json_response::<Project>(req).await {
            Ok(project) => {
                self.state.projects.push(project);
                self.state.is_loading = false;
            }
            Err(err) => self.fail(ERR_CREATE_PROJECT, err),
        }
    }

    pub async fn update_project(&mut self, id: &str, input: UpdateProjectRequest) {
        let req = self
            .cl
            .patch(self.url(&format!("/projects/{id}")))
            .json(&input);
        match json_response::<Project>(req).await {
            Ok(project) => {
                if let Some(cur) = self.state.projects.iter_mut().find(|p| p.id == project.id) {
                    *cur = project;
                }
            }
            Err(err) => self.fail(ERR_UPDATE_PROJECT, err),
        }
    }

    /// Removes the project and its cached tasks, the server deletes them too.
    pub async fn delete_project(&mut self, id: &str) {
        let req = self.cl.delete(self.url(&format!("/projects/{id}")));
        match empty_response(req).await {
            Ok(()) => {
                self.state.projects.retain(|p| p.id != id);
                self.state.tasks.remove(id);
            }
            Err(err) => self.fail(ERR_DELETE_PROJECT, err),
        }
    }

    pub async fn fetch_tasks(&mut self, project_id: &str) {
        let req = self
            .cl
            .get(self.url(&format!("/projects/{project_id}/tasks")));
        match json_response::<Vec<Task>>(req).await {
            Ok(tasks) => {
                self.state.tasks.insert(project_id.to_string(), tasks);
            }
            Err(err) => self.fail(ERR_FETCH_TASKS, err),
        }
    }

    pub async fn add_task(&mut self, project_id: &str, input: CreateTaskRequest) {
        let req = self
            .cl
            .post(self.url(&format!("/projects/{project_id}/tasks")))
            .json(&input);
        match json_response::<Task>(req).await {
            Ok(task) => self
                .state
                .tasks
                .entry(project_id.to_string())
                .or_default()
                .push(task),
            Err(err) => self.fail(ERR_CREATE_TASK, err),
        }
    }

    pub async fn toggle_task(&mut self, task_id: &str, completed: bool) {
        let req = self
            .cl
            .patch(self.url(&format!("/tasks/{task_id}")))
            .json(&json!({ "completed": completed }));
        match json_response::<Task>(req).await {
            Ok(task) => {
                let cur = self
                    .state
                    .tasks
                    .get_mut(&task.project_id)
                    .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task.id));
                match cur {
                    Some(cur) => *cur = task,
                    None => debug!("task {task_id} isn't cached, nothing to reconcile"),
                }
            }
            Err(err) => self.fail(ERR_UPDATE_TASK, err),
        }
    }

    pub async fn delete_task(&mut self, task_id: &str) {
        let req = self.cl.delete(self.url(&format!("/tasks/{task_id}")));
        match empty_response(req).await {
            Ok(()) => {
                for tasks in self.state.tasks.values_mut() {
                    if let Some(idx) = tasks.iter().position(|t| t.id == task_id) {
                        tasks.remove(idx);
                        break;
                    }
                }
            }
            Err(err) => self.fail(ERR_DELETE_TASK, err),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn begin_loading(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
    }

    fn fail(&mut self, msg: &str, err: ClientError) {
        warn!("{msg}: {err}");
        self.state.error = Some(msg.to_string());
        self.state.is_loading = false;
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error.message);

    Err(ClientError::Status(status, message))
}

async fn json_response<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = check_status(req.send().await?).await?;

    Ok(resp.json().await?)
}

async fn empty_response(req: RequestBuilder) -> Result<()> {
    check_status(req.send().await?).await?;

    Ok(())
}
