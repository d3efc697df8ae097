//! Turns the draft into a request and commits whatever comes back.
//!
//! A submission is split in two synchronous halves with the network call in
//! between: [`Dispatcher::begin`] validates the draft, stages the user message
//! and builds the context; [`Dispatcher::complete`] commits the reply or the
//! fallback and releases the request flag. The store is never borrowed across
//! the await, so a second submit during the call sees `Sending` and does nothing.

use tracing::{debug, info, warn};

use crate::api::ChatMessage;
use crate::core::backend::ChatBackend;
use crate::core::constants::FALLBACK_REPLY;
use crate::core::errors::ExchangeError;
use crate::core::message::{Message, Role};
use crate::core::mirror::SnapshotMirror;
use crate::core::store::ConversationStore;

/// A submission whose request is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub request_id: u64,
    pub context: Vec<ChatMessage>,
}

pub struct Dispatcher {
    system_prompt: String,
    next_request_id: u64,
    in_flight: Option<u64>,
}

impl Dispatcher {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            next_request_id: 1,
            in_flight: None,
        }
    }

    /// Stage the draft as a user message and build the outbound context.
    ///
    /// Returns `None` without touching the store when the trimmed draft is
    /// empty or a request is already outstanding.
    pub fn begin(&mut self, store: &mut ConversationStore) -> Option<PendingExchange> {
        if !store.can_send() {
            debug!(
                sending = store.is_sending(),
                "submit ignored: nothing to send or request in flight"
            );
            return None;
        }

        let trimmed = store.draft().trim().to_string();
        // Context is built from what was committed before the user message is staged.
        let prior = store.mirror();

        if let Err(err) = store.begin_sending() {
            warn!("submit refused: {err}");
            return None;
        }
        store.set_draft(String::new());
        store.set_error(None);
        store.append_message(Message::user(trimmed.clone()));

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);

        let context = build_context(&self.system_prompt, &prior, &trimmed);
        info!(request_id, context_len = context.len(), "submission started");
        Some(PendingExchange {
            request_id,
            context,
        })
    }

    /// Commit the outcome of the outstanding request and return to `Idle`.
    ///
    /// Outcomes for anything other than the outstanding request are dropped.
    pub fn complete(
        &mut self,
        store: &mut ConversationStore,
        request_id: u64,
        outcome: Result<String, ExchangeError>,
    ) {
        if self.in_flight != Some(request_id) {
            warn!(
                request_id,
                in_flight = ?self.in_flight,
                "dropping outcome for a request that is not in flight"
            );
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(reply) => {
                info!(request_id, "reply committed");
                store.append_message(Message::assistant(reply));
            }
            Err(err) => {
                warn!(request_id, error = ?err, "exchange failed");
                store.append_message(Message::assistant(FALLBACK_REPLY));
                store.set_error(Some(err.banner_text()));
            }
        }
        store.end_sending();
    }

    /// Run a whole submission against `backend`. Returns whether anything was sent.
    pub async fn submit(
        &mut self,
        store: &mut ConversationStore,
        backend: &dyn ChatBackend,
    ) -> bool {
        let Some(pending) = self.begin(store) else {
            return false;
        };
        let outcome = backend.complete(pending.context).await;
        self.complete(store, pending.request_id, outcome);
        true
    }
}

/// `[system] ++ prior transcript ++ [user utterance]`.
pub fn build_context(
    system_prompt: &str,
    prior: &SnapshotMirror,
    utterance: &str,
) -> Vec<ChatMessage> {
    let mut context = Vec::with_capacity(prior.len() + 2);
    context.push(ChatMessage::new(Role::System.as_str(), system_prompt));
    context.extend(prior.iter().map(Message::to_chat_message));
    context.push(ChatMessage::new(Role::User.as_str(), utterance));
    context
}
