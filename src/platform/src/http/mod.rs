pub mod projects;
pub mod tasks;

use std::sync::Arc;

use axum::middleware;
use axum::Extension;
use axum::Router;
use common::config::Config;
use common::http::measure_request_response;
use common::http::print_request_response;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_request_body::MapRequestBodyLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::services::ServeDir;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::PlatformProvider;

pub const API_PREFIX: &str = "/api";

pub fn attach_routes(mut router: Router, platform: &Arc<PlatformProvider>, cfg: &Config) -> Router {
    let mut api = Router::new();
    api = projects::attach_routes(api);
    api = tasks::attach_routes(api);
    router = router.nest(API_PREFIX, api);

    if let Some(ui_path) = &cfg.data.ui_path {
        debug!("serving ui from {:?}", ui_path);
        let serve_dir = ServeDir::new(ui_path)
            .not_found_service(ServeFile::new(ui_path.join("index.html")));
        router = router.fallback_service(serve_dir);
    }

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(measure_request_response))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            // before the body is buffered for logging
            .layer(MapResponseBodyLayer::new(axum::body::Body::new))
            .layer(RequestBodyLimitLayer::new(
                cfg.server.max_request_body_bytes,
            ))
            .layer(MapRequestBodyLayer::new(axum::body::Body::new))
            .layer(middleware::from_fn(print_request_response))
            .layer(Extension(platform.projects.clone()))
            .layer(Extension(platform.tasks.clone())),
    )
}
