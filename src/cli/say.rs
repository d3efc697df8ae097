//! One-shot "say" command

use std::error::Error;

use crate::core::backend::{ChatBackend, HttpChatBackend};
use crate::core::dispatcher::Dispatcher;
use crate::core::settings::ClientSettings;
use crate::core::store::ConversationStore;

/// What a single exchange left behind.
#[derive(Debug, PartialEq, Eq)]
pub struct SayOutcome {
    /// The assistant's reply, or the fallback text when the exchange failed.
    pub reply: String,
    pub error: Option<String>,
}

pub async fn run_say(prompt: Vec<String>, settings: ClientSettings) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: medibot say <prompt>");
        std::process::exit(2);
    }

    let backend = HttpChatBackend::new(&settings)?;
    let outcome = say_once(&backend, &settings.system_prompt, &prompt).await;

    println!("{}", outcome.reply);
    if let Some(error) = outcome.error {
        eprintln!("❌ Error: {error}");
        std::process::exit(1);
    }
    Ok(())
}

/// Run one submission on a fresh conversation.
pub async fn say_once(
    backend: &dyn ChatBackend,
    system_prompt: &str,
    prompt: &str,
) -> SayOutcome {
    let mut store = ConversationStore::new();
    let mut dispatcher = Dispatcher::new(system_prompt);
    store.set_draft(prompt);
    dispatcher.submit(&mut store, backend).await;

    let reply = store
        .transcript()
        .last()
        .filter(|message| message.is_assistant())
        .map(|message| message.content().to_string())
        .unwrap_or_default();
    SayOutcome {
        reply,
        error: store.error().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{FALLBACK_REPLY, GREETING};
    use crate::core::errors::ExchangeError;
    use crate::utils::test_utils::ScriptedBackend;

    #[tokio::test]
    async fn say_returns_reply_and_sends_greeting_as_history() {
        let backend = ScriptedBackend::new([Ok("Drink water.".to_string())]);

        let outcome = say_once(&backend, "prompt", "I feel dizzy").await;

        assert_eq!(
            outcome,
            SayOutcome {
                reply: "Drink water.".into(),
                error: None,
            }
        );
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][1].content, GREETING);
        assert_eq!(calls[0][2].content, "I feel dizzy");
    }

    #[tokio::test]
    async fn say_reports_fallback_and_error() {
        let backend = ScriptedBackend::new([Err(ExchangeError::network("connection refused"))]);

        let outcome = say_once(&backend, "prompt", "hi").await;

        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert_eq!(outcome.error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn blank_prompt_sends_nothing() {
        let backend = ScriptedBackend::new([]);

        let outcome = say_once(&backend, "prompt", "   ").await;

        assert!(backend.calls().is_empty());
        assert_eq!(outcome.reply, GREETING);
        assert!(outcome.error.is_none());
    }
}
