pub mod http;

use async_trait::async_trait;
use crate::error::ExchangeFailure;
use crate::models::chat::{ ChatRequest, ChatResponse };

pub use self::http::HttpChatBackend;

/// The remote side of an exchange. One call per submitted message, no retries.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn exchange(&self, request: &ChatRequest) -> Result<ChatResponse, ExchangeFailure>;
}
