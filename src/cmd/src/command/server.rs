use std::sync::Arc;

use axum::Router;
use common::config::Config;
use metadata::MetadataProvider;
use platform::PlatformProvider;
use tokio::select;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tracing::debug;
use tracing::info;

use crate::error::Error;
use crate::error::Result;
use crate::init_metrics;

pub async fn start(cfg: Config) -> Result<()> {
    debug!("data path: {:?}", cfg.data.path);
    if let Some(ui_path) = &cfg.data.ui_path {
        if !ui_path.exists() {
            return Err(Error::FileNotFound(format!(
                "ui path {:?} doesn't exist",
                ui_path
            )));
        }
    }

    if let Some(listen) = cfg.metrics.listen {
        init_metrics(listen)?;
    }

    if cfg.data.serialize_writes {
        info!("writes to each data file are serialized");
    }
    let md = Arc::new(MetadataProvider::new(
        &cfg.data.path,
        cfg.data.serialize_writes,
    ));
    let platform_provider = Arc::new(PlatformProvider::new(md));

    info!("attaching platform routes...");
    let router = platform::http::attach_routes(Router::new(), &platform_provider, &cfg);

    let mut sig_int = signal(SignalKind::interrupt())?;
    let mut sig_term = signal(SignalKind::terminate())?;
    let shutdown = async move {
        select! {
            _=sig_int.recv()=>info!("SIGINT received"),
            _=sig_term.recv()=>info!("SIGTERM received"),
        }
    };

    let listener = tokio::net::TcpListener::bind(cfg.server.host).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");

    Ok(())
}
