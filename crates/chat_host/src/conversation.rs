//! In-memory, append-only conversation history.

use shared::agent_api::Message;

/// Ordered oldest-first. Messages are never edited or removed.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `messages` in order. Ids are not deduplicated.
    pub fn append<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        self.messages.extend(messages);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
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

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::agent_api::AuthorRole;

    #[test]
    fn test_append_preserves_order() {
        let m1 = Message::user("first").unwrap();
        let m2 = Message::reply("second", "AI Assistant", Some(m1.id())).unwrap();

        let mut one_by_one = Conversation::new();
        one_by_one.append([m1.clone()]);
        one_by_one.append([m2.clone()]);

        let mut batched = Conversation::new();
        batched.append([m1, m2]);

        assert_eq!(one_by_one.messages(), batched.messages());
        assert_eq!(batched.len(), 2);
        assert_eq!(batched.last().unwrap().author_role(), AuthorRole::Assistant);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let m = Message::user("again").unwrap();
        let mut conversation = Conversation::new();
        conversation.append([m.clone(), m]);
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut conversation = Conversation::new();
        conversation.append(Vec::new());
        assert!(conversation.is_empty());
        assert!(conversation.last().is_none());
    }
}
