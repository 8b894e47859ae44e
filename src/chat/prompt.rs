// src/chat/prompt.rs
use crate::types::{ChatMessage, ChatRole};

const ASSISTANT_MARKER: &str = "Assistant:";

pub const PERSONA: &str = r#"You are OppGenie, an AI assistant focused on helping Gen Z find opportunities in tech and computer science.
Your goal is to provide specific, actionable opportunities and advice.
When suggesting opportunities, include:
- Specific companies, programs, or initiatives
- Requirements and deadlines if applicable
- Links or resources for more information
- Next steps for applying"#;

/// One `Role: content` line per message
pub fn format_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}: {}", msg.role.label(), msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persona, the conversation so far, and an open assistant turn
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    format!(
        "{}\n\nCurrent conversation:\n{}\n{}",
        PERSONA,
        format_history(messages),
        ASSISTANT_MARKER
    )
}

/// Text after the last `Assistant:` marker, cut where the model starts a user turn
pub fn extract_reply(generated_text: &str) -> Option<String> {
    let tail = generated_text
        .rsplit(ASSISTANT_MARKER)
        .next()
        .unwrap_or(generated_text);

    let user_turn = format!("\n{}:", ChatRole::User.label());
    let reply = match tail.find(&user_turn) {
        Some(idx) => &tail[..idx],
        None => tail,
    }
    .trim();

    if reply.is_empty() {
        None
    } else {
        Some(reply.to_string())
    }
}
