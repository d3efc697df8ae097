//! Terminal presentation for interactive sessions.
//!
//! - [`chat_loop`]: owns the conversation store, turns user intents into
//!   store mutations and dispatcher calls, and collects backend replies.
//! - [`renderer`]: paints store state to a line-oriented terminal.
//!
//! Ownership boundary: this layer only reads store state and emits intents;
//! [`crate::core`] owns the conversation rules and backend coordination.

pub mod chat_loop;
pub mod renderer;
