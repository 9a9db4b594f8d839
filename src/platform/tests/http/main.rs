mod projects;
mod tasks;

use std::env::temp_dir;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use common::config::Config;
use metadata::MetadataProvider;
use platform::http::attach_routes;
use platform::PlatformProvider;
use uuid::Uuid;

pub fn data_path() -> PathBuf {
    let mut path = temp_dir();
    path.push(format!("{}", Uuid::new_v4()));
    path
}

pub async fn run_http_service_with(
    path: &Path,
    cfg: &Config,
) -> anyhow::Result<(String, Arc<MetadataProvider>)> {
    let md = Arc::new(MetadataProvider::new(path, false));
    let platform = Arc::new(PlatformProvider::new(md.clone()));
    let router = attach_routes(Router::new(), &platform, cfg);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok((format!("http://{addr}/api"), md))
}

pub async fn run_http_service_at(path: &Path) -> anyhow::Result<(String, Arc<MetadataProvider>)> {
    run_http_service_with(path, &Config::default()).await
}

pub async fn run_http_service() -> anyhow::Result<(String, Arc<MetadataProvider>)> {
    run_http_service_at(&data_path()).await
}

#[macro_export]
macro_rules! assert_response_status_eq {
    ($resp:expr,$status:expr) => {{
        assert_eq!(
            $resp.status(),
            $status,
            "{}",
            $resp.text().await.unwrap().as_str()
        )
    }};
}
