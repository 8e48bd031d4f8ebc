//! Prompt templates for grounded answer generation

/// Grounding task template sent to the store's generation provider.
///
/// Only the question is substituted into its slot. The retrieved text is
/// appended by the store's grouped-task mechanism, so the `{text}` slot stays
/// literal and no user input other than the question reaches the
/// instructional framing.
const GROUNDED_ANSWER_TASK: &str = "Based on the retrieved context from ISO medical device standards and regulations, \
answer the following question accurately and concisely. If the context doesn't contain enough \
information to answer the question, say so.

Question: {question}

Context: {text}

Answer:";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the grouped-generation task for a question
    pub fn grounded_answer_task(question: &str) -> String {
        GROUNDED_ANSWER_TASK.replace("{question}", question)
    }
}
