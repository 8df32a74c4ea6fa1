use anyhow::Result;
use restomenu_user::RegisterInput;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use restomenu::{AppState, config::Config};

/// Creates the configured root account as superuser when it does not exist yet.
async fn ensure_root_user(config: &Config, command: &restomenu_user::Command) -> Result<()> {
    let (Some(username), Some(password)) = (&config.root.username, &config.root.password) else {
        return Ok(());
    };

    if command.find_by_username(username).await?.is_some() {
        return Ok(());
    }

    let id = command
        .register(RegisterInput {
            username: username.to_owned(),
            email: None,
            password: password.to_owned(),
            password_confirm: password.to_owned(),
            is_superuser: true,
        })
        .await?;

    tracing::info!(user = id, username, "root superuser created");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(err = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(err = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting restomenu server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // The write pool creates the database file, so it must exist before the read-only pool.
    let write_pool = restomenu::create_write_pool(&config.database.url).await?;
    restomenu::migrate(&write_pool).await?;
    let read_pool =
        restomenu::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let state = restomenu_shared::State {
        read_db: read_pool.clone(),
        write_db: write_pool.clone(),
    };

    ensure_root_user(&config, &restomenu_user::Command(state.clone())).await?;
    tokio::fs::create_dir_all(&config.media.root).await?;

    let app = restomenu::router(AppState::new(config, state))
        .layer(axum::middleware::from_fn(
            restomenu::middleware::cache_control_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
