//! Model answer cleanup.

use medbot_types::config::AnswerConfig;

/// Strips boilerplate phrases and normalizes whitespace in model answers.
#[derive(Debug, Clone, Default)]
pub struct AnswerCleaner {
    phrases: Vec<String>,
}

impl AnswerCleaner {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases: phrases.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }

    /// Remove every configured phrase, then collapse whitespace runs
    /// (newlines included) to single spaces.
    pub fn clean(&self, answer: &str) -> String {
        let mut text = answer.to_string();
        for phrase in &self.phrases {
            if text.contains(phrase.as_str()) {
                text = text.replace(phrase.as_str(), "");
            }
        }
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl From<&AnswerConfig> for AnswerCleaner {
    fn from(config: &AnswerConfig) -> Self {
        Self::new(config.unwanted_phrases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_configured_phrases() {
        let cleaner = AnswerCleaner::from(&AnswerConfig::default());
        let answer = "Based on the provided context, rest and drink fluids.";
        assert_eq!(cleaner.clean(answer), ", rest and drink fluids.");
    }

    #[test]
    fn test_collapses_whitespace_and_newlines() {
        let cleaner = AnswerCleaner::default();
        assert_eq!(
            cleaner.clean("  **Rest**\n\n- fluids\t and  sleep \n"),
            "**Rest** - fluids and sleep"
        );
    }

    #[test]
    fn test_empty_phrases_are_ignored() {
        let cleaner = AnswerCleaner::new(vec![String::new(), "um".to_string()]);
        assert_eq!(cleaner.clean("um yes"), "yes");
    }
}
