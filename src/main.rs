use anyhow::Result;
use healthboard::dashboard::{self, ChartSelection};
use healthboard::render::{LogRenderer, RenderSession};
use healthboard::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let snapshot_repo = Arc::new(snapshot_repo::SnapshotRepo::from_config(&app_config.source)?);
    tracing::info!(
        start = %app_config.range.start,
        end = %app_config.range.end,
        source = ?app_config.source.kind,
        "health-check range configured"
    );

    // `healthboard report` assembles once, logs the charts and exits.
    if std::env::args().nth(1).as_deref() == Some("report") {
        return report(&snapshot_repo, &app_config).await;
    }

    let app = routes::app(snapshot_repo, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn report(repo: &snapshot_repo::SnapshotRepo, config: &config::AppConfig) -> Result<()> {
    let view = match dashboard::load(repo, config, ChartSelection::All).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "report failed");
            return Err(e.into());
        }
    };
    let mut session = RenderSession::new(LogRenderer);
    session.render_view(&view);
    tracing::info!("{}", view.summary);
    session.clear();
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
