//! MediBot is a terminal client for a MediBot chat backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation: the transcript store and its snapshot
//!   mirror, the request dispatcher, the backend seam, and configuration.
//! - [`ui`] runs the interactive session loop and paints conversation state
//!   to the terminal.
//! - [`api`] defines the JSON payloads exchanged with the backend.
//! - [`cli`] parses arguments and routes into the chat loop or one-shot
//!   commands.
//!
//! The binary (`src/main.rs`) only calls [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
