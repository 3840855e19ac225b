//! Built-in tools for mnemo.
//!
//! Tool names double as the call keywords the model emits (`Time()`,
//! `WebSearch("query")`), so they are capitalized single words.

pub mod clock;
pub mod web_search;

pub use clock::ClockTool;
pub use web_search::WebSearchTool;

use mnemo_core::tool::ToolRegistry;

/// Build the default tool registry for a session.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ClockTool));
    registry.register(Box::new(WebSearchTool::new()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_contents() {
        let registry = default_registry();
        assert_eq!(registry.names(), vec!["Time", "WebSearch"]);
        assert!(registry.get("Time").is_some());
        assert!(registry.get("WebSearch").is_some());
    }

    #[test]
    fn descriptions_render_one_line_per_tool() {
        let block = default_registry().render_descriptions();
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- Time: "));
        assert!(lines[1].starts_with("- WebSearch: "));
    }
}
