//! Conversation flow on both sides of the `/get` endpoint.
//!
//! Client side: [`controller::ChatController`] reads the input field, shows
//! the user's message, asks a [`backend::ChatBackend`] for a reply and shows
//! the formatted answer (or a fallback). Server side:
//! [`history::ConversationHistory`], [`answer::AnswerCleaner`] and
//! [`reply::ReplyService`] turn a message into a model answer.

pub mod answer;
pub mod backend;
pub mod controller;
pub mod history;
pub mod input;
pub mod reply;
