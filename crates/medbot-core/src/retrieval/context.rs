//! Placing retrieved document text into the system prompt.

use medbot_types::config::CONTEXT_PLACEHOLDER;
use medbot_types::retrieval::RetrievedChunk;

/// Join chunk texts, closest first, separated by a blank line.
pub fn join_chunks(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Replace the `{context}` placeholder in `system_prompt` with `context`.
///
/// A prompt without the placeholder gets the context appended after a
/// blank line; an empty context leaves such a prompt untouched.
pub fn fill_context(system_prompt: &str, context: &str) -> String {
    if system_prompt.contains(CONTEXT_PLACEHOLDER) {
        system_prompt.replace(CONTEXT_PLACEHOLDER, context)
    } else if context.is_empty() {
        system_prompt.to_string()
    } else {
        format!("{system_prompt}\n\n{context}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> RetrievedChunk {
        RetrievedChunk {
            source: "flu.md".to_string(),
            text: text.to_string(),
            distance: 0.1,
        }
    }

    #[test]
    fn test_join_chunks_in_order() {
        let joined = join_chunks(&[chunk("Rest.\n"), chunk(" Drink fluids.")]);
        assert_eq!(joined, "Rest.\n\nDrink fluids.");
        assert_eq!(join_chunks(&[]), "");
    }

    #[test]
    fn test_fill_context_replaces_placeholder() {
        let prompt = "Answer briefly.\n\n{context}";
        assert_eq!(fill_context(prompt, "Rest."), "Answer briefly.\n\nRest.");
        assert_eq!(fill_context(prompt, ""), "Answer briefly.\n\n");
    }

    #[test]
    fn test_fill_context_without_placeholder() {
        assert_eq!(fill_context("Answer briefly.", "Rest."), "Answer briefly.\n\nRest.");
        assert_eq!(fill_context("Answer briefly.", ""), "Answer briefly.");
    }
}
