use std::sync::Arc;

use axum::extract::Extension;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing;
use axum::Router;
use common::entities::CreateTaskRequest;
use common::entities::Task;
use common::entities::UpdateTaskRequest;
use common::http::Json;

use crate::tasks::Tasks;
use crate::Result;

async fn create(
    Extension(provider): Extension<Arc<Tasks>>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>)> {
    Ok((
        StatusCode::CREATED,
        Json(provider.create(&project_id, request).await?),
    ))
}

async fn list(
    Extension(provider): Extension<Arc<Tasks>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Task>>> {
    Ok(Json(provider.list_by_project(&project_id).await?))
}

async fn update(
    Extension(provider): Extension<Arc<Tasks>>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    Ok(Json(provider.update(&task_id, request).await?))
}

async fn delete(
    Extension(provider): Extension<Arc<Tasks>>,
    Path(task_id): Path<String>,
) -> Result<StatusCode> {
    provider.delete(&task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn attach_routes(router: Router) -> Router {
    router
        .route("/projects/:id/tasks", routing::get(list).post(create))
        .route("/tasks/:id", routing::patch(update).delete(delete))
}
