use crate::backend::ChatBackend;
use crate::error::ExchangeFailure;
use crate::history::ConversationHistory;
use crate::models::chat::{ ChatRequest, ChatResponse, Message };
use crate::render::{ ChatRenderer, Sender };
use log::{ debug, error };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };
use tokio::task::JoinHandle;

pub const FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was blank after trimming; nothing happened.
    Ignored,
    Answered(Message),
    /// The fallback text was displayed. History holds the user turn only.
    Failed(ExchangeFailure),
}

impl SubmitOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, SubmitOutcome::Answered(_))
    }
}

/// Owns the conversation history and drives exchanges against the backend.
///
/// Nothing serializes submissions: several exchanges may be in flight at
/// once and their replies land in history in completion order. The history
/// lock is never held across the network call.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    renderer: Arc<dyn ChatRenderer>,
    history: Mutex<ConversationHistory>,
}

impl ChatSession {
    /// Starts a session whose history and display both hold `greeting`.
    pub fn initialize(
        backend: Arc<dyn ChatBackend>,
        renderer: Arc<dyn ChatRenderer>,
        greeting: &str
    ) -> Self {
        let mut history = ConversationHistory::new();
        let greeting = Message::assistant(greeting);
        renderer.append_message(Sender::from(greeting.role), &greeting.content);
        history.push(greeting);

        Self {
            backend,
            renderer,
            history: Mutex::new(history),
        }
    }

    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let message = raw_input.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let request = self.begin_exchange(message);
        let result = self.backend.exchange(&request).await;
        self.finish_exchange(result)
    }

    /// Records the user turn right away, then runs the network call on the
    /// runtime. Returns `None` for blank input.
    pub fn dispatch(self: &Arc<Self>, raw_input: &str) -> Option<JoinHandle<SubmitOutcome>> {
        let message = raw_input.trim();
        if message.is_empty() {
            return None;
        }

        let request = self.begin_exchange(message);
        let session = Arc::clone(self);
        Some(
            tokio::spawn(async move {
                let result = session.backend.exchange(&request).await;
                session.finish_exchange(result)
            })
        )
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock_history().snapshot()
    }

    pub fn history_len(&self) -> usize {
        self.lock_history().len()
    }

    // Display and history are updated under one guard so both see the same
    // order when exchanges overlap.
    fn begin_exchange(&self, message: &str) -> ChatRequest {
        let history = {
            let mut history = self.lock_history();
            self.record(&mut history, Message::user(message));
            history.snapshot()
        };
        self.renderer.clear_input();
        debug!("Sending message with {} history entries", history.len());

        ChatRequest {
            message: message.to_string(),
            history,
        }
    }

    fn finish_exchange(&self, result: Result<ChatResponse, ExchangeFailure>) -> SubmitOutcome {
        let mut history = self.lock_history();
        match result {
            Ok(resp) => {
                let reply = Message::assistant(resp.response);
                self.record(&mut history, reply.clone());
                SubmitOutcome::Answered(reply)
            }
            Err(e) => {
                error!("Chat exchange failed: {}", e);
                self.renderer.append_message(Sender::Bot, FALLBACK_MESSAGE);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn record(&self, history: &mut ConversationHistory, message: Message) {
        self.renderer.append_message(Sender::from(message.role), &message.content);
        history.push(message);
    }

    fn lock_history(&self) -> MutexGuard<'_, ConversationHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
