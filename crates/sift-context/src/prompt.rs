//! Prompt assembly for context-grounded answering.

/// Instruction used when the configuration does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on \
     the provided context. If the answer is not in the context, say so clearly.";

/// Build the generation prompt from a question and retrieved context passages
///
/// Passages are numbered from 1 in the order given.
pub fn build_prompt(question: &str, contexts: &[String], system_prompt: Option<&str>) -> String {
    let system_prompt = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);

    let context_text = contexts
        .iter()
        .enumerate()
        .map(|(index, context)| format!("Document {}:\n{context}", index + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{system_prompt}\n\nContext:\n{context_text}\n\nQuestion: {question}\n\nAnswer:")
}
