use crate::models::chat::Role;
use log::debug;
use std::io::{ self, Write };
use std::sync::Mutex;

/// Styling tag attached to each rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl From<Role> for Sender {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Sender::User,
            Role::Assistant => Sender::Bot,
        }
    }
}

/// Display and input surface the session writes to.
pub trait ChatRenderer: Send + Sync {
    fn append_message(&self, sender: Sender, text: &str);

    fn clear_input(&self);
}

pub struct TerminalRenderer;

impl ChatRenderer for TerminalRenderer {
    fn append_message(&self, sender: Sender, text: &str) {
        if let Err(e) = write_line(&mut std::io::stdout().lock(), sender, text) {
            debug!("Failed to write message to stdout: {}", e);
        }
    }

    // stdin lines are consumed as they are read.
    fn clear_input(&self) {}
}

fn write_line<W: Write>(out: &mut W, sender: Sender, text: &str) -> io::Result<()> {
    let label = match sender {
        Sender::User => "You",
        Sender::Bot => "Bot",
    };
    writeln!(out, "{}: {}", label, text)?;
    out.flush()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub text: String,
}

/// Keeps everything in memory. Useful when embedding the session or in tests.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    entries: Mutex<Vec<RenderedMessage>>,
    input_clears: Mutex<usize>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RenderedMessage> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn input_clears(&self) -> usize {
        *self.input_clears.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChatRenderer for BufferRenderer {
    fn append_message(&self, sender: Sender, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RenderedMessage { sender, text: text.to_string() });
    }

    fn clear_input(&self) {
        *self.input_clears.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}
