//! Conversation controller.
//!
//! Wires the input field, the conversation log and a [`ChatBackend`]:
//! greets once on page load, turns Enter into a send, shows the user's
//! message, and shows either the formatted reply or the fallback message.
//!
//! Sends are serialized: a second send waits until the first reply (or
//! failure) has been appended, so user and bot entries always alternate.
//! Every request is bounded by `request_timeout`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, error};

use medbot_types::chat::Sender;
use medbot_types::config::ClientConfig;
use medbot_types::error::ChatError;

use super::backend::ChatBackend;
use super::input::{InputField, KeyPress};
use crate::format::format_reply;
use crate::log::{ConversationLog, append_message};

/// Fixed texts and limits used by the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub greeting: String,
    pub fallback_message: String,
    pub avatar: String,
    pub request_timeout: Duration,
}

impl From<&ClientConfig> for ControllerSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            greeting: config.greeting.clone(),
            fallback_message: config.fallback_message.clone(),
            avatar: config.avatar.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// What a call to [`ChatController::send_message`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty; nothing appended, nothing sent.
    Ignored,
    /// The reply was formatted and appended.
    Replied,
    /// The request failed; the fallback message was appended.
    Fallback,
}

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the host applies its default behavior.
    Default,
    /// Default behavior suppressed and a send was attempted.
    Sent(SendOutcome),
}

impl KeyOutcome {
    pub fn default_prevented(&self) -> bool {
        matches!(self, KeyOutcome::Sent(_))
    }
}

/// Drives one conversation.
pub struct ChatController<B, L> {
    backend: B,
    log: Arc<Mutex<L>>,
    input: InputField,
    settings: ControllerSettings,
    greeted: AtomicBool,
    in_flight: tokio::sync::Mutex<()>,
}

impl<B, L> ChatController<B, L>
where
    B: ChatBackend,
    L: ConversationLog,
{
    pub fn new(backend: B, log: Arc<Mutex<L>>, settings: ControllerSettings) -> Self {
        Self {
            backend,
            log,
            input: InputField::new(),
            settings,
            greeted: AtomicBool::new(false),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn log(&self) -> &Arc<Mutex<L>> {
        &self.log
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Append the formatted greeting as the first bot message.
    ///
    /// Runs once per controller; returns `false` on every later call.
    pub fn on_page_load(&self) -> bool {
        if self.greeted.swap(true, Ordering::SeqCst) {
            return false;
        }
        let formatted = format_reply(&self.settings.greeting);
        self.append(&formatted, Sender::Bot);
        true
    }

    /// Send whatever is in the input field.
    ///
    /// Never fails: transport, decode and timeout errors are logged and
    /// replaced by the fallback bot message.
    pub async fn send_message(&self) -> SendOutcome {
        let Some(message) = self.input.take_trimmed() else {
            debug!("ignoring empty input");
            return SendOutcome::Ignored;
        };

        let _in_flight = self.in_flight.lock().await;
        self.append(&message, Sender::User);

        let timeout = self.settings.request_timeout;
        let result = match tokio::time::timeout(timeout, self.backend.send(&message)).await {
            Ok(result) => result,
            Err(_) => Err(ChatError::Timeout(timeout)),
        };

        match result {
            Ok(reply) => {
                debug!(chars = reply.len(), "reply received");
                let formatted = format_reply(&reply);
                self.append(&formatted, Sender::Bot);
                SendOutcome::Replied
            }
            Err(e) => {
                error!(error = %e, "reply request failed");
                self.append(&self.settings.fallback_message, Sender::Bot);
                SendOutcome::Fallback
            }
        }
    }

    /// Plain Enter sends the message; every other key is left alone.
    pub async fn handle_key(&self, key: KeyPress) -> KeyOutcome {
        if key.submits() {
            KeyOutcome::Sent(self.send_message().await)
        } else {
            KeyOutcome::Default
        }
    }

    fn append(&self, content: &str, sender: Sender) {
        let mut log = self.log.lock().expect("conversation log lock poisoned");
        append_message(&mut *log, content, sender, &self.settings.avatar);
    }
}
