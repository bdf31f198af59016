use clap::Parser;

pub const DEFAULT_GREETING: &str =
    "Hello! I'm your AI Product Assistant. How can I help you with your business requirements today?";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Chat backend endpoint that accepts `POST` requests (e.g., http://127.0.0.1:10000/chat)
    #[arg(long, env = "CHAT_ENDPOINT", default_value = "http://127.0.0.1:10000/chat")]
    pub endpoint: String,

    /// Assistant greeting shown when the session starts. Also the first history entry.
    #[arg(long, env = "CHAT_GREETING", default_value = DEFAULT_GREETING)]
    pub greeting: String,

    /// Do not probe the backend's `/health` route on startup.
    #[arg(long, env = "SKIP_HEALTH_CHECK", default_value = "false")]
    pub skip_health_check: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
