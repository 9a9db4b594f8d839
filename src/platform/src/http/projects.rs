use std::sync::Arc;

use axum::extract::Extension;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing;
use axum::Router;
use common::entities::CreateProjectRequest;
use common::entities::Project;
use common::entities::UpdateProjectRequest;
use common::http::Json;

use crate::projects::Projects;
use crate::Result;

async fn create(
    Extension(provider): Extension<Arc<Projects>>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>)> {
    Ok((StatusCode::CREATED, Json(provider.create(request).await?)))
}

async fn get_by_id(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<String>,
) -> Result<Json<Project>> {
    Ok(Json(provider.get_by_id(&project_id).await?))
}

async fn list(Extension(provider): Extension<Arc<Projects>>) -> Result<Json<Vec<Project>>> {
    Ok(Json(provider.list().await?))
}

async fn update(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<Project>> {
    Ok(Json(provider.update(&project_id, request).await?))
}

async fn delete(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<String>,
) -> Result<StatusCode> {
    provider.delete(&project_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn attach_routes(router: Router) -> Router {
    router
        .route("/projects", routing::post(create).get(list))
        .route(
            "/projects/:id",
            routing::get(get_by_id).patch(update).delete(delete),
        )
}
