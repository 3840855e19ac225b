//! Two-tier memory — bounded short-term buffer plus long-term summary.
//!
//! The short-term buffer holds the most recent messages verbatim, FIFO
//! evicted once it exceeds the configured maximum. Whenever eviction
//! occurs and long-term memory is enabled, the evicted messages are folded
//! into a single summary string by asking the model to merge them with the
//! existing summary. The summary is replaced wholesale on every
//! regeneration; no history of summaries is kept.
//!
//! The buffer is owned here and mutated only through [`MemoryManager::record_turn`];
//! nothing outside this type evicts or reorders it.

use mnemo_core::message::Message;
use mnemo_core::provider::{Provider, ProviderRequest};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// One completed exchange, produced by the turn orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user_input: String,
    pub result: String,
}

/// Immutable memory configuration, resolved once at session construction.
#[derive(Debug, Clone)]
pub struct MemoryPolicy {
    /// Maximum buffered messages before FIFO eviction.
    pub max_short_messages: usize,

    /// Approximate token budget the summarizer is asked to stay within.
    pub max_long_memory_size: usize,

    /// Whether evicted messages are folded into the long-term summary.
    pub long_memory_enabled: bool,

    /// Whether recent messages are buffered at all. When disabled the
    /// effective capacity is zero: each turn's messages evict immediately,
    /// so long-term summarization (if enabled) still sees every turn.
    pub short_memory_enabled: bool,
}

impl MemoryPolicy {
    /// Build a policy from the loaded application config.
    pub fn from_config(config: &mnemo_config::MemoryConfig) -> Self {
        Self {
            max_short_messages: config.short_memory_size,
            max_long_memory_size: config.long_memory_size,
            long_memory_enabled: !config.disable_long_memory,
            short_memory_enabled: !config.disable_short_memory,
        }
    }

    /// The buffer capacity actually enforced.
    fn effective_capacity(&self) -> usize {
        if self.short_memory_enabled {
            self.max_short_messages
        } else {
            0
        }
    }
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self::from_config(&mnemo_config::MemoryConfig::default())
    }
}

/// Owns the session's memory state and applies the eviction protocol.
pub struct MemoryManager {
    policy: MemoryPolicy,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    buffer: VecDeque<Message>,
    long_summary: String,
}

impl MemoryManager {
    /// Create an empty memory for a new session.
    pub fn new(
        policy: MemoryPolicy,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            policy,
            provider,
            model: model.into(),
            temperature,
            buffer: VecDeque::new(),
            long_summary: String::new(),
        }
    }

    /// The current short-term buffer, oldest first.
    pub fn short_term(&self) -> &VecDeque<Message> {
        &self.buffer
    }

    /// The current long-term summary (empty until the first regeneration).
    pub fn long_summary(&self) -> &str {
        &self.long_summary
    }

    pub fn policy(&self) -> &MemoryPolicy {
        &self.policy
    }

    /// Record one completed turn.
    ///
    /// Appends the turn's user and assistant messages, FIFO-evicts down to
    /// the configured bound, and — when eviction occurred and long-term
    /// memory is enabled — regenerates the summary through the model. A
    /// failed summarization leaves the prior summary untouched; the turn's
    /// result was computed before this step and is never affected.
    pub async fn record_turn(&mut self, turn: &Turn) {
        self.buffer.push_back(Message::user(&turn.user_input));
        self.buffer.push_back(Message::assistant(&turn.result));

        let capacity = self.policy.effective_capacity();
        let mut dropped = Vec::new();
        while self.buffer.len() > capacity {
            // push_back/pop_front keeps eviction strictly FIFO.
            if let Some(oldest) = self.buffer.pop_front() {
                dropped.push(oldest);
            }
        }

        if dropped.is_empty() {
            return;
        }

        if !self.policy.long_memory_enabled {
            debug!(count = dropped.len(), "Long-term memory disabled, discarding evicted messages");
            return;
        }

        let prompt = self.build_summary_prompt(&dropped);
        let request = ProviderRequest::new(
            self.model.clone(),
            vec![Message::system(prompt)],
            self.temperature,
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                self.long_summary = response.content.trim().to_string();
                debug!(
                    evicted = dropped.len(),
                    summary_chars = self.long_summary.len(),
                    "Long-term summary regenerated"
                );
            }
            Err(e) => {
                // Keep the prior summary; the turn itself already succeeded.
                warn!(error = %e, "Summarization failed, keeping previous long-term summary");
            }
        }
    }

    /// Build the standalone summarization request: instruction plus the old
    /// summary, the evicted messages (in eviction order), and the current
    /// post-eviction buffer, each in its own tagged block.
    fn build_summary_prompt(&self, dropped: &[Message]) -> String {
        let mut content = format!(
            concat!(
                "Use the following messages to update the long-term memory summary of an agent. ",
                "This will replace the existing long-term memory summary, so combine the old and new information. ",
                "The long-term memory should broadly capture the agent context over time in a concise manner. ",
                "You will receive the existing long-term memory summary in <long> tags, ",
                "a series of messages that have just dropped off the short-term history in <messages> tags, ",
                "and the short-term memory in <short> tags. ",
                "Use this information to create an updated long-term memory summary without duplicating the short-term memory. ",
                "Keep the size of the summary approximately {} tokens or less.",
            ),
            self.policy.max_long_memory_size
        );

        content.push_str("\n\n");
        content.push_str(&format!("<long>{}</long>\n<messages>", self.long_summary));
        for msg in dropped {
            content.push_str(&format!("<{0}>{1}</{0}>\n", msg.role, msg.content));
        }
        content.push_str("</messages>\n<short>");
        for msg in &self.buffer {
            content.push_str(&format!("<{0}>{1}</{0}>\n", msg.role, msg.content));
        }
        content.push_str("</short>");
        content
    }
}
