//! ReAct loop controller — Thought → Action → Observation → Answer.
//!
//! One invocation owns its transcript and iterates up to the configured
//! cap. Each iteration generates a reply, checks for the terminal
//! `Answer:` marker, and otherwise dispatches any `Action:` through the
//! tool registry, feeding the result back as an Observation. All internal
//! failures become transcript content or the final fallback string; the
//! caller always gets text.

use crate::parser::{self, ParsedAction};
use motormind_core::message::Message;
use motormind_core::prompts::react_system_prompt;
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_core::tool::ToolRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Returned when the iteration cap is exhausted without an `Answer:`.
pub const FALLBACK_ANSWER: &str = "I'm sorry, but I couldn't find a final answer.";

/// Mutable state of one loop invocation. Created per `run` call, owned by
/// it exclusively, and discarded when it returns — continuity between
/// calls travels through the conversation-history seed text instead.
struct LoopState {
    transcript: Vec<Message>,
    iteration: u32,
    terminal: bool,
}

impl LoopState {
    fn new(seed: Vec<Message>) -> Self {
        Self {
            transcript: seed,
            iteration: 0,
            terminal: false,
        }
    }

    /// Advance to the next iteration; false once the cap is reached.
    fn tick(&mut self, max_iterations: u32) -> bool {
        if self.terminal || self.iteration >= max_iterations {
            return false;
        }
        self.iteration += 1;
        true
    }

    fn finish(&mut self, answer: String) -> String {
        self.terminal = true;
        answer
    }
}

/// The ReAct loop controller.
pub struct ReactAgent {
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Tool registry.
    tools: Arc<ToolRegistry>,
    /// Generation knobs passed to every call.
    options: GenerationOptions,
    /// Maximum reasoning iterations.
    max_iterations: u32,
    /// Wall-clock timeout per generation call.
    generation_timeout: Duration,
    /// The fixed instruction prompt, assembled from the registry.
    system_prompt: String,
}

impl ReactAgent {
    /// Create a new ReAct agent over a provider and tool registry.
    ///
    /// The system prompt is assembled once from the registry's usage
    /// catalog, so the advertised tool set always matches dispatch.
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>) -> Self {
        let system_prompt = react_system_prompt(&tools.usage_catalog());
        Self {
            provider,
            tools,
            options: GenerationOptions::default(),
            max_iterations: 3,
            generation_timeout: Duration::from_secs(60),
            system_prompt,
        }
    }

    /// Set max iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the per-call generation timeout.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Set the generation options.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the seed transcript for one invocation.
    ///
    /// Ordering is fixed: system instructions first, then conversation
    /// history (if any), then image context (if any), then the user.
    fn seed_transcript(
        &self,
        user_prompt: &str,
        conversation_history: &str,
        car_details: &str,
    ) -> Vec<Message> {
        let mut transcript = vec![Message::system(&self.system_prompt)];

        if !conversation_history.is_empty() {
            transcript.push(Message::assistant(format!(
                "Conversation history: {conversation_history}"
            )));
        }

        if !car_details.is_empty() {
            transcript.push(Message::assistant(format!(
                "Car image details: {car_details}"
            )));
        }

        transcript.push(Message::user(user_prompt));
        transcript
    }

    /// Execute the ReAct loop. Never fails: every internal error becomes
    /// transcript content or the fallback answer.
    pub async fn run(
        &self,
        user_prompt: &str,
        conversation_history: &str,
        car_details: &str,
    ) -> String {
        let mut state = LoopState::new(self.seed_transcript(
            user_prompt,
            conversation_history,
            car_details,
        ));
        let mut tool_calls = 0usize;

        info!(max_iter = self.max_iterations, "ReAct loop starting");

        while state.tick(self.max_iterations) {
            debug!(iteration = state.iteration, "ReAct iteration");

            // ── Generate ──
            // The transcript already ends with the user message; an empty
            // prompt tells the provider not to append another one.
            let generated = tokio::time::timeout(
                self.generation_timeout,
                self.provider.generate("", &state.transcript, &self.options),
            )
            .await;

            let reply = match generated {
                Ok(Ok(reply)) if !reply.is_empty() => reply,
                Ok(Ok(_)) => {
                    // Empty reply fails both marker checks; the iteration
                    // is consumed as a Thought-only pass.
                    warn!(iteration = state.iteration, "provider returned empty reply");
                    continue;
                }
                Ok(Err(e)) => {
                    warn!(iteration = state.iteration, "generation failed: {e}");
                    continue;
                }
                Err(_) => {
                    warn!(iteration = state.iteration, "generation timed out");
                    continue;
                }
            };

            state.transcript.push(Message::assistant(&reply));

            // ── Terminal check ──
            if let Some(answer) = parser::extract_answer(&reply) {
                info!(
                    iterations = state.iteration,
                    tool_calls, "ReAct loop completed"
                );
                return state.finish(answer);
            }

            // ── Action check ──
            match parser::parse_action(&reply) {
                Some(ParsedAction::Call {
                    tool_name,
                    tool_input,
                }) => {
                    tool_calls += 1;
                    debug!(tool = %tool_name, "dispatching action");
                    let output = self.tools.dispatch(&tool_name, &tool_input).await;
                    state
                        .transcript
                        .push(Message::system(format!("Observation: {output}")));
                }
                Some(ParsedAction::Unparseable) => {
                    state.transcript.push(Message::system(
                        "Observation: Could not parse Action properly.",
                    ));
                }
                // Plain Thought: the reply is already in the transcript.
                None => continue,
            }
        }

        warn!(
            max_iter = self.max_iterations,
            "ReAct: max iterations reached without an answer"
        );
        FALLBACK_ANSWER.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
