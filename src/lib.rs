pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod logic;
pub mod model;
pub mod view;

pub use api::{ApiClient, QueryBackend};
pub use config::{AppConfig, StalePolicy};
pub use console::{Console, ConsoleEvent, ConsoleSettings, Screen, TerminalScreen};
pub use error::{ConsoleError, Result};
pub use model::*;

/// Wire up the real backend, clipboard and terminal and run until the user
/// quits or stdin closes.
pub async fn run_console() -> anyhow::Result<()> {
    use log::{info, warn};
    use std::sync::Arc;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the rendered frames
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = AppConfig::load()?;
    let client = ApiClient::from_config(&config)?;
    info!("query backend at {}", client.base_url());

    match client.health().await {
        Ok(status) => info!("backend says: {}", status.message),
        Err(e) => warn!("backend not reachable yet: {}", e),
    }

    let console = Console::new(
        Arc::new(client),
        Arc::new(view::SystemClipboard),
        TerminalScreen,
        ConsoleSettings::from(&config.console),
    );

    let input = tokio::spawn(console::read_commands(
        console.sender(),
        model::QueryRegistry::new(),
    ));

    console.run().await;
    input.abort();
    info!("bye");

    Ok(())
}
