//! Marker-protocol parsing for model replies.
//!
//! The protocol is plain text: a terminal reply contains `Answer:`, a
//! tool request contains `Action: <tool>: <input>`. Both markers split on
//! their FIRST occurrence, so answer text that happens to mention the
//! word "Action" later is never truncated. This is deliberately kept
//! compatible with the marker semantics the prompt teaches the model,
//! fragile as free-text markers inherently are — a Thought that quotes
//! "Answer:" mid-sentence will false-trigger.

/// The answer marker — everything after its first occurrence is terminal.
pub const ANSWER_MARKER: &str = "Answer:";

/// The action marker — the remainder is a `tool: input` payload.
pub const ACTION_MARKER: &str = "Action:";

/// A parsed `Action:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    /// `tool_name: tool_input`, split on the first colon, both trimmed.
    Call { tool_name: String, tool_input: String },
    /// Payload had no colon, so no tool name can be recovered.
    Unparseable,
}

/// Extract the terminal answer from a reply, if present.
///
/// Splits on the FIRST `Answer:` and returns the trimmed remainder.
pub fn extract_answer(reply: &str) -> Option<String> {
    reply
        .split_once(ANSWER_MARKER)
        .map(|(_, rest)| rest.trim().to_string())
}

/// Extract and parse an `Action:` payload from a reply, if present.
///
/// Splits the reply on the FIRST `Action:`, then splits the payload on
/// its FIRST colon into tool name and input. A payload with no colon is
/// [`ParsedAction::Unparseable`].
pub fn parse_action(reply: &str) -> Option<ParsedAction> {
    let (_, payload) = reply.split_once(ACTION_MARKER)?;
    let payload = payload.trim();

    match payload.split_once(':') {
        Some((tool_name, tool_input)) => Some(ParsedAction::Call {
            tool_name: tool_name.trim().to_string(),
            tool_input: tool_input.trim().to_string(),
        }),
        None => Some(ParsedAction::Unparseable),
    }
}
