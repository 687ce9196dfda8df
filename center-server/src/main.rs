use center_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; environment variables win either way
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    center_server::init_logger_with_file(Some(&config.log_level), log_dir.to_str());

    tracing::info!("Learning center server starting...");

    let state = ServerState::initialize(&config).await;

    // Demo data is opt-in and never runs as part of normal startup.
    if std::env::args().any(|arg| arg == "--seed-demo") {
        center_server::seed::run(&state.pool).await?;
        tracing::info!("Demo data seeded, exiting");
        return Ok(());
    }

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
