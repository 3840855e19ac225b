//! Tool trait — the abstraction over agent capabilities.
//!
//! The model requests a tool by answering with `ToolName(arg)` in plain text;
//! the agent crate parses that syntax and dispatches here. Tools therefore
//! take a single optional string argument and return a string result.

use crate::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;

/// The core Tool trait.
///
/// Each tool implements this trait and is registered in the `ToolRegistry`
/// before the session starts. The `name` doubles as the call keyword the
/// model must emit, so it should be a single word (e.g. `Time`, `WebSearch`).
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool, used as the call keyword.
    fn name(&self) -> &str;

    /// A usage description rendered into the agent's instructions.
    fn description(&self) -> &str;

    /// Execute the tool. `None` means the model used the zero-argument form
    /// `ToolName()` — not a blank-string argument.
    async fn run(&self, argument: Option<&str>) -> std::result::Result<String, ToolError>;
}

/// A registry of available tools, immutable after construction.
///
/// The turn orchestrator uses this to look up and execute the tool a model
/// reply names; the identity builder uses it to render usage instructions.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    // Registration order, so rendered instructions are deterministic.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by exact name match.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// List registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Render the usage description block injected into the agent identity,
    /// one `- Name: description` line per tool.
    pub fn render_descriptions(&self) -> String {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
