//! Identity — the agent's static system prompt.
//!
//! The identity is assembled once at session start from a role description
//! and the tool-usage instructions rendered from the registry, and never
//! changes afterwards. It is always the first message of every assembled
//! context.

use crate::tool::ToolRegistry;
use serde::{Deserialize, Serialize};

/// The agent's identity: role description plus tool-usage instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The agent's name (used for display, not sent to the model).
    pub name: String,

    /// The full system prompt sent verbatim as the first context message.
    pub system_prompt: String,
}

impl Identity {
    /// Build an identity from an explicit system prompt (override path —
    /// skips instruction rendering entirely).
    pub fn from_prompt(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Build the default identity for a session: the role description plus
    /// instructions on how to invoke the registered tools via the
    /// `ToolName(arg)` reply syntax.
    pub fn with_tools(name: impl Into<String>, registry: &ToolRegistry) -> Self {
        let role = "You are a tool-calling agent that may use tools by responding according to their instructions.\n";
        let instructions = format!(
            concat!(
                "You may use the following tools to assist with user queries.\n",
                "Avoid using tools if the user query can be answered without them.\n",
                "Here are the tools you can use:\n",
                "{}\n",
                "When you decide to use a tool, respond with the format:\n",
                "'ToolName(arg)' where ToolName is the name of the tool and arg is the argument to pass to the tool.\n",
                "If the tool does not require an argument, use 'ToolName()'.\n",
                "Only use one tool per response.\n",
            ),
            registry.render_descriptions()
        );

        Self {
            name: name.into(),
            system_prompt: format!("{role}{instructions}"),
        }
    }

    /// Rough token count of the system prompt (4 chars ≈ 1 token).
    pub fn estimated_tokens(&self) -> usize {
        self.system_prompt.len() / 4
    }
}
