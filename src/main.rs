use tasks::{
    application::task_service::TaskServiceImpl,
    config::ServerConfig,
    domain::repository::TaskRepository,
    http::routing::{self, tasks as task_routes},
    infrastructure::sqlite_repo::SqliteTaskRepository,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;
    let repo = SqliteTaskRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = TaskServiceImpl::new(repo);
    let router = routing::app(task_routes::router(task_routes::AppState { service }));

    tracing::info!(addr = %config.bind_addr, database_url = %config.database_url, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.bind_addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
