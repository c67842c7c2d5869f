//! Interactive terminal chat client.
//!
//! Drives the same `ChatController` a browser page would, with a
//! `TerminalLog` standing in for the chat box. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod terminal_log;
