//! Service entry point: load the configuration, seed the store,
//! register the routes, run the server.

use std::sync::Arc;

use log::info;

use userdir_rs::{routes, AppState, Config, HttpServer, ServerConfig, UserStore, CONFIG_PATH};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A missing config file is created with defaults; a broken one is
    // fatal.
    let config = Config::ensure_and_load(CONFIG_PATH)?;

    let state = Arc::new(AppState {
        store: UserStore::seeded(),
        config: config.clone(),
    });

    let server = HttpServer::new(ServerConfig {
        addr: config.socket_addr()?,
        ..ServerConfig::default()
    });
    routes::register(&server, state).await;

    info!("Server '{name}' starting on port {port}", name = config.name, port = config.port);
    server.start().await?;

    Ok(())
}
