use std::sync::Arc;

use crate::core::message::Message;

/// Read-only copy of the transcript as of its latest commit.
///
/// Cloning is cheap and the clone never changes, so the dispatcher can take
/// one before staging a new user message and build context from exactly what
/// was committed at that moment.
#[derive(Debug, Clone)]
pub struct SnapshotMirror {
    entries: Arc<[Message]>,
}

impl SnapshotMirror {
    pub(crate) fn capture(transcript: &[Message]) -> Self {
        Self {
            entries: Arc::from(transcript),
        }
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }
}
