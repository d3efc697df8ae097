use std::io::{self, Write};

use crate::core::message::{Message, Role};
use crate::core::store::ConversationStore;

/// Something that shows conversation state to the user.
///
/// A renderer only ever sees the store by shared reference; all changes go
/// through intents handled by the chat loop.
pub trait Renderer {
    fn paint(&mut self, store: &ConversationStore) -> io::Result<()>;

    /// One-off line that is not part of the conversation.
    fn notice(&mut self, text: &str) -> io::Result<()>;
}

/// Appends new transcript entries, the typing indicator and the error banner
/// to a plain text stream.
pub struct TerminalRenderer<W: Write> {
    out: W,
    painted: usize,
    was_sending: bool,
    last_error: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            painted: 0,
            was_sending: false,
            last_error: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_message(&mut self, message: &Message) -> io::Result<()> {
        let prefix = match message.role() {
            Role::User => "You",
            Role::Assistant | Role::System => "MediBot",
        };
        let mut lines = message.content().lines();
        writeln!(self.out, "{prefix}: {}", lines.next().unwrap_or_default())?;
        for line in lines {
            writeln!(self.out, "  {line}")?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn paint(&mut self, store: &ConversationStore) -> io::Result<()> {
        let transcript = store.transcript();
        for message in &transcript[self.painted.min(transcript.len())..] {
            self.write_message(message)?;
        }
        self.painted = transcript.len();

        let sending = store.is_sending();
        if sending && !self.was_sending {
            writeln!(self.out, "MediBot is typing…")?;
        }
        self.was_sending = sending;

        let error = store.error();
        if error != self.last_error.as_deref() {
            if let Some(text) = error {
                writeln!(self.out, "⚠️  {text}")?;
            }
            self.last_error = error.map(str::to_owned);
        }

        self.out.flush()
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "({text})")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::GREETING;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn paints_each_message_once() {
        let mut store = ConversationStore::new();
        let mut renderer = TerminalRenderer::new(Vec::new());

        renderer.paint(&store).unwrap();
        store.append_message(Message::user("hello"));
        renderer.paint(&store).unwrap();
        renderer.paint(&store).unwrap();

        let text = output(renderer);
        assert_eq!(text.matches(GREETING).count(), 1);
        assert_eq!(text.matches("You: hello").count(), 1);
    }

    #[test]
    fn multiline_replies_are_indented() {
        let store = ConversationStore::with_greeting(Message::assistant("line one\nline two"));
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.paint(&store).unwrap();

        assert_eq!(output(renderer), "MediBot: line one\n  line two\n\n");
    }

    #[test]
    fn typing_indicator_and_banner_show_on_transitions() {
        let mut store = ConversationStore::new();
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.paint(&store).unwrap();

        store.begin_sending().unwrap();
        renderer.paint(&store).unwrap();
        renderer.paint(&store).unwrap();

        store.set_error(Some("rate limited".into()));
        store.end_sending();
        renderer.paint(&store).unwrap();
        renderer.paint(&store).unwrap();

        let text = output(renderer);
        assert_eq!(text.matches("MediBot is typing…").count(), 1);
        assert_eq!(text.matches("⚠️  rate limited").count(), 1);
    }
}
