use jifora_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    print_banner();

    tracing::info!("Jifora server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state and background workers
    let (state, notify_rx) = ServerState::initialize(&config)?;
    state.start_background_tasks(notify_rx);

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
