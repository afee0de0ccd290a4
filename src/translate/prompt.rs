use crate::llm::ChatMessage;

pub fn system_instruction(from_lang: &str, to_lang: &str) -> String {
    format!(
        "Translate from {} to {}. Return ONLY the translated text.",
        from_lang, to_lang
    )
}

/// The fixed two-turn conversation: instruction, then the raw text as the user turn
pub fn build_messages(text: &str, from_lang: &str, to_lang: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_instruction(from_lang, to_lang)),
        ChatMessage::user(text),
    ]
}
