use crate::types::{ChatMessage, ChatMode};
use crate::utils::config::{
    PolicyConfig, DEFAULT_GENERAL_INSTRUCTION, DEFAULT_GROUNDED_INSTRUCTION,
};

/// System-instruction policy for the two chat modes.
///
/// The text is configuration, not business logic: the grounded instruction
/// directs the model to answer only from the supplied context, admit
/// ignorance when it is insufficient, and handle greetings and identity
/// questions; the general instruction is more permissive.
#[derive(Debug, Clone)]
pub struct PromptPolicy {
    pub grounded_instruction: String,
    pub general_instruction: String,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            grounded_instruction: DEFAULT_GROUNDED_INSTRUCTION.to_string(),
            general_instruction: DEFAULT_GENERAL_INSTRUCTION.to_string(),
        }
    }
}

impl From<&PolicyConfig> for PromptPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            grounded_instruction: config.grounded_instruction.clone(),
            general_instruction: config.general_instruction.clone(),
        }
    }
}

impl PromptPolicy {
    /// Build the model-ready message sequence for one turn.
    ///
    /// Grounded mode embeds the retrieved passages (blank-line separated)
    /// plus the latest user question; an empty `retrieved` slice still
    /// produces a valid prompt with an empty context block. General mode
    /// passes the latest user content through. The input conversation is
    /// never mutated; a new sequence is produced each call.
    ///
    /// The caller guarantees a non-empty conversation ending in a user turn.
    pub fn assemble(
        &self,
        retrieved: &[String],
        conversation: &[ChatMessage],
        mode: ChatMode,
    ) -> Vec<ChatMessage> {
        let question = conversation
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        match mode {
            ChatMode::Grounded => {
                let context = retrieved.join("\n\n");
                let prompt = format!(
                    "Document Context:\n{}\n\nBased on the above document, answer the following question:\n{}",
                    context, question
                );
                vec![
                    ChatMessage::system(self.grounded_instruction.clone()),
                    ChatMessage::user(prompt),
                ]
            }
            ChatMode::General => vec![
                ChatMessage::system(self.general_instruction.clone()),
                ChatMessage::user(question),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn grounded_prompt_embeds_context_and_question() {
        let policy = PromptPolicy::default();
        let retrieved = vec!["first passage".to_string(), "second passage".to_string()];
        let conversation = vec![ChatMessage::user("what is this about?")];

        let messages = policy.assemble(&retrieved, &conversation, ChatMode::Grounded);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("first passage\n\nsecond passage"));
        assert!(messages[1].content.contains("what is this about?"));
    }

    #[test]
    fn grounded_prompt_is_valid_with_empty_context() {
        let policy = PromptPolicy::default();
        let conversation = vec![ChatMessage::user("anything here?")];

        let messages = policy.assemble(&[], &conversation, ChatMode::Grounded);

        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.starts_with("Document Context:"));
        assert!(messages[1].content.contains("anything here?"));
    }

    #[test]
    fn general_mode_passes_latest_user_content_through() {
        let policy = PromptPolicy::default();
        let conversation = vec![
            ChatMessage::user("earlier"),
            ChatMessage::assistant("reply"),
            ChatMessage::user("hello"),
        ];

        let messages = policy.assemble(&[], &conversation, ChatMode::General);

        assert_eq!(messages[1].content, "hello");
        assert_eq!(messages[0].content, policy.general_instruction);
    }

    #[test]
    fn assemble_does_not_mutate_the_conversation() {
        let policy = PromptPolicy::default();
        let conversation = vec![ChatMessage::user("q")];
        let before = conversation.clone();

        let _ = policy.assemble(&["ctx".to_string()], &conversation, ChatMode::Grounded);

        assert_eq!(conversation, before);
    }
}
