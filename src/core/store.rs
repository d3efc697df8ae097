//! Conversation state: transcript, draft, request flag and error slot.

use crate::core::constants::GREETING;
use crate::core::errors::StoreError;
use crate::core::message::Message;
use crate::core::mirror::SnapshotMirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Sending,
}

pub struct ConversationStore {
    transcript: Vec<Message>,
    mirror: SnapshotMirror,
    draft: String,
    request_state: RequestState,
    error: Option<String>,
}

impl ConversationStore {
    /// A fresh store whose transcript holds only the greeting.
    pub fn new() -> Self {
        Self::with_greeting(Message::assistant(GREETING))
    }

    pub fn with_greeting(greeting: Message) -> Self {
        let transcript = vec![greeting];
        let mirror = SnapshotMirror::capture(&transcript);
        Self {
            transcript,
            mirror,
            draft: String::new(),
            request_state: RequestState::Idle,
            error: None,
        }
    }

    pub fn append_message(&mut self, message: Message) {
        self.transcript.push(message);
        self.mirror = SnapshotMirror::capture(&self.transcript);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn begin_sending(&mut self) -> Result<(), StoreError> {
        if self.request_state == RequestState::Sending {
            return Err(StoreError::AlreadySending);
        }
        self.request_state = RequestState::Sending;
        Ok(())
    }

    pub fn end_sending(&mut self) {
        self.request_state = RequestState::Idle;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() && self.request_state == RequestState::Idle
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn mirror(&self) -> SnapshotMirror {
        self.mirror.clone()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    pub fn is_sending(&self) -> bool {
        self.request_state == RequestState::Sending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    #[test]
    fn new_store_is_seeded_with_greeting_only() {
        let store = ConversationStore::new();
        assert_eq!(store.transcript().len(), 1);
        assert_eq!(store.transcript()[0].role(), Role::Assistant);
        assert_eq!(store.transcript()[0].content(), GREETING);
        assert_eq!(store.request_state(), RequestState::Idle);
        assert!(store.error().is_none());
        assert!(store.draft().is_empty());
    }

    #[test]
    fn append_updates_mirror_in_the_same_call() {
        let mut store = ConversationStore::new();
        let before = store.mirror();

        store.append_message(Message::user("hello"));

        assert_eq!(before.len(), 1);
        let after = store.mirror();
        assert_eq!(after.len(), 2);
        assert_eq!(after.entries()[1].content(), "hello");
        assert_eq!(after.entries()[1].id(), store.transcript()[1].id());
    }

    #[test]
    fn begin_sending_refuses_double_entry() {
        let mut store = ConversationStore::new();
        assert!(store.begin_sending().is_ok());
        assert_eq!(store.begin_sending(), Err(StoreError::AlreadySending));
        assert!(store.is_sending());

        store.end_sending();
        assert_eq!(store.request_state(), RequestState::Idle);
        assert!(store.begin_sending().is_ok());
    }

    #[test]
    fn end_sending_is_unconditional() {
        let mut store = ConversationStore::new();
        store.end_sending();
        assert_eq!(store.request_state(), RequestState::Idle);
    }

    #[test]
    fn can_send_requires_text_and_idle() {
        let mut store = ConversationStore::new();
        assert!(!store.can_send());

        store.set_draft("   \t\n");
        assert!(!store.can_send());

        store.set_draft("  hi ");
        assert!(store.can_send());

        store.begin_sending().unwrap();
        assert!(!store.can_send());
    }

    #[test]
    fn set_error_replaces_slot() {
        let mut store = ConversationStore::new();
        store.set_error(Some("first".into()));
        store.set_error(Some("second".into()));
        assert_eq!(store.error(), Some("second"));
        store.set_error(None);
        assert!(store.error().is_none());
    }
}
