//! Per-conversation history kept by the chat backend.
//!
//! Lines are stored as `"User: ..."` / `"Bot: ..."` transcript lines; only
//! the most recent `limit` lines are kept and sent to the model.

use std::collections::VecDeque;

/// Rolling transcript of one browser conversation.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    lines: VecDeque<String>,
    limit: usize,
    /// Completed user+bot exchanges.
    turn_count: u32,
}

impl ConversationHistory {
    /// Create an empty history keeping at most `limit` lines.
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(limit.min(64)),
            limit,
            turn_count: 0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Record a user message.
    pub fn push_user(&mut self, msg: &str) {
        self.push(format!("User: {msg}"));
    }

    /// Record a bot answer, completing a turn.
    pub fn push_bot(&mut self, answer: &str) {
        self.push(format!("Bot: {answer}"));
        self.turn_count += 1;
    }

    /// Transcript prompt for the model: retained lines, then a `Bot:` cue.
    pub fn prompt(&self) -> String {
        let mut prompt = self
            .lines
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        prompt.push_str("\nBot:");
        prompt
    }

    fn push(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }
}
