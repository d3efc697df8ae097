//! The interactive session.
//!
//! The loop owns the [`ConversationStore`] and is its only writer. User
//! intents arrive on one channel; backend outcomes come back on another,
//! tagged with the request number they answer. Every handled event is
//! followed by a repaint.

use std::error::Error;
use std::io::{self, BufRead};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::backend::{ChatBackend, HttpChatBackend};
use crate::core::dispatcher::Dispatcher;
use crate::core::errors::ExchangeError;
use crate::core::settings::ClientSettings;
use crate::core::store::ConversationStore;
use crate::ui::renderer::{Renderer, TerminalRenderer};

/// What the user can ask of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetDraft(String),
    Submit,
    Quit,
}

type Outcome = (u64, Result<String, ExchangeError>);

pub struct ChatLoop<R: Renderer> {
    store: ConversationStore,
    dispatcher: Dispatcher,
    backend: Arc<dyn ChatBackend>,
    renderer: R,
}

impl<R: Renderer> ChatLoop<R> {
    pub fn new(
        store: ConversationStore,
        dispatcher: Dispatcher,
        backend: Arc<dyn ChatBackend>,
        renderer: R,
    ) -> Self {
        Self {
            store,
            dispatcher,
            backend,
            renderer,
        }
    }

    /// Run until a `Quit` intent or the intent channel closes.
    ///
    /// A request still outstanding at that point is waited for, so its reply
    /// (or fallback) is committed and painted before returning.
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
    ) -> (ConversationStore, R) {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<Outcome>();
        let mut closing = false;
        self.repaint();

        loop {
            tokio::select! {
                intent = intents.recv(), if !closing => match intent {
                    Some(Intent::SetDraft(text)) => self.store.set_draft(text),
                    Some(Intent::Submit) => self.submit(&outcome_tx),
                    Some(Intent::Quit) | None => closing = true,
                },
                Some((request_id, outcome)) = outcome_rx.recv() => {
                    self.dispatcher.complete(&mut self.store, request_id, outcome);
                }
                else => break,
            }

            self.repaint();
            if closing && !self.store.is_sending() {
                break;
            }
        }

        (self.store, self.renderer)
    }

    fn submit(&mut self, outcome_tx: &mpsc::UnboundedSender<Outcome>) {
        let ignored_while_sending =
            self.store.is_sending() && !self.store.draft().trim().is_empty();
        let Some(pending) = self.dispatcher.begin(&mut self.store) else {
            if ignored_while_sending {
                self.notify("Still waiting for the previous reply; message not sent");
            }
            return;
        };

        let backend = Arc::clone(&self.backend);
        let tx = outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.complete(pending.context).await;
            if tx.send((pending.request_id, outcome)).is_err() {
                debug!(request_id = pending.request_id, "session ended before reply arrived");
            }
        });
    }

    fn repaint(&mut self) {
        if let Err(err) = self.renderer.paint(&self.store) {
            warn!("failed to paint conversation: {err}");
        }
    }

    fn notify(&mut self, text: &str) {
        if let Err(err) = self.renderer.notice(text) {
            warn!("failed to show notice: {err}");
        }
    }
}

/// Turn lines from `input` into intents: `/quit` quits, anything else is
/// drafted and submitted. Returns at `/quit` or end of input, dropping the sender.
///
/// Blocking; interactive sessions run it on a dedicated thread.
pub fn forward_lines<I: BufRead>(
    input: I,
    intents: mpsc::UnboundedSender<Intent>,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim() == "/quit" {
            let _ = intents.send(Intent::Quit);
            break;
        }
        if intents.send(Intent::SetDraft(line)).is_err()
            || intents.send(Intent::Submit).is_err()
        {
            break;
        }
    }
    Ok(())
}

/// Interactive session on stdin/stdout against the configured backend.
pub async fn run_chat(settings: ClientSettings) -> Result<(), Box<dyn Error>> {
    let backend = HttpChatBackend::new(&settings)?;
    info!(endpoint = backend.endpoint(), "starting chat session");
    eprintln!("💬 MediBot · {}", backend.endpoint());
    eprintln!("💡 Type a message and press Enter; /quit or Ctrl+D to leave.");
    eprintln!("   MediBot is not a substitute for professional medical advice.");

    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        if let Err(err) = forward_lines(io::stdin().lock(), tx) {
            warn!("stopped reading input: {err}");
        }
    });

    let session = ChatLoop::new(
        ConversationStore::new(),
        Dispatcher::new(settings.system_prompt),
        Arc::new(backend),
        TerminalRenderer::new(io::stdout()),
    );
    session.run(rx).await;
    Ok(())
}
