use crate::models::chat::{ Message, Role };

/// Append-only log of the messages exchanged in one session.
///
/// There is no way to remove or edit an entry once pushed; the session is the
/// only writer.
#[derive(Clone, Debug, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Owned copy sent as context with each request.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

pub fn format_transcript(messages: &[Message]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut result = String::from("Conversation so far:\n");
    for msg in messages {
        let role_display = match msg.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };

        result.push_str(&format!("{}: {}\n", role_display, msg.content));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut history = ConversationHistory::new();
        assert!(history.is_empty());
        history.push(Message::assistant("greeting"));
        history.push(Message::user("question"));
        history.push(Message::assistant("answer"));

        assert_eq!(history.len(), 3);
        let roles: Vec<Role> = history.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(history.last().map(|m| m.content.as_str()), Some("answer"));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut history = ConversationHistory::new();
        history.push(Message::user("one"));
        let snap = history.snapshot();
        history.push(Message::user("two"));

        assert_eq!(snap.len(), 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn transcript_labels_roles() {
        let text = format_transcript(&[Message::assistant("Hello!"), Message::user("hi")]);
        assert_eq!(text, "Conversation so far:\nAssistant: Hello!\nUser: hi\n");
        assert_eq!(format_transcript(&[]), "");
    }
}
