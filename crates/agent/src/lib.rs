//! The core reasoning loop — the heart of Motormind.
//!
//! The agent follows a **Thought → Action → Observation** cycle over a
//! text-marker protocol:
//!
//! 1. **Seed** the transcript (ReAct instructions + history + image
//!    context + user message)
//! 2. **Generate** a reply from the provider
//! 3. **If `Answer:`**: return the text after the first marker
//! 4. **If `Action:`**: parse `tool: input`, dispatch via the registry,
//!    append the Observation, loop back to step 2
//! 5. **Otherwise**: the reply is a Thought; loop back to step 2
//!
//! The loop continues until an `Answer:` appears or the iteration cap is
//! reached, in which case a fixed fallback string is returned. Nothing
//! escapes the loop as an error.

pub mod parser;
pub mod rag;
pub mod react;

pub use parser::{extract_answer, parse_action, ParsedAction};
pub use rag::{RagPipeline, RagReply};
pub use react::{ReactAgent, FALLBACK_ANSWER};

#[cfg(test)]
pub(crate) mod test_helpers;
