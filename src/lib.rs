pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod render;
pub mod repl;
pub mod session;

use backend::HttpChatBackend;
use cli::Args;
use config::SessionConfig;
use log::{ info, warn };
use render::TerminalRenderer;
use session::ChatSession;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = SessionConfig::from_args(&args)?;

    info!("--- Chat Session Configuration ---");
    info!("Chat Endpoint: {}", config.endpoint);
    info!("Health Check: {}", config.health_check);
    info!("----------------------------------");

    let backend = HttpChatBackend::from_config(&config)?;
    if config.health_check {
        match backend.health_check().await {
            Ok(()) => info!("Backend healthy at {}", backend.health_url()),
            Err(e) => warn!("Backend health check at {} failed: {}", backend.health_url(), e),
        }
    }

    let session = Arc::new(
        ChatSession::initialize(Arc::new(backend), Arc::new(TerminalRenderer), &config.greeting)
    );
    repl::run_terminal(session).await?;

    Ok(())
}
