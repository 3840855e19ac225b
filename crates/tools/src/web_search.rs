//! Web search tool — returns deterministic offline search results.
//!
//! In production this would call a real search API (Brave, Google, etc.).
//! Generating plausible results locally lets the full agent loop run
//! end-to-end without network access or API keys.

use async_trait::async_trait;
use mnemo_core::error::ToolError;
use mnemo_core::tool::Tool;

pub struct WebSearchTool {
    max_results: usize,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self { max_results: 5 }
    }

    /// Strip one pair of surrounding quotes if present. The call syntax
    /// captures the argument literally, so `WebSearch("cats")` arrives here
    /// as `"cats"` including the quotes.
    fn normalize_query(raw: &str) -> &str {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| {
                trimmed
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
            });
        unquoted.unwrap_or(trimmed)
    }

    fn format_results(query: &str, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return "No search results found.".into();
        }

        let mut output = format!("Search results for '{query}':\n\n");
        for (i, result) in results.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, result.title));
            output.push_str(&format!("   URL: {}\n", result.url));
            if !result.description.is_empty() {
                output.push_str(&format!("   {}\n", result.description));
            }
            output.push('\n');
        }
        output.trim_end().to_string()
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "WebSearch"
    }

    fn description(&self) -> &str {
        "Searches the web for information. Usage: return 'WebSearch(\"your query here\")'"
    }

    async fn run(&self, argument: Option<&str>) -> std::result::Result<String, ToolError> {
        let raw = argument.ok_or_else(|| {
            ToolError::InvalidArguments("WebSearch requires a query argument".into())
        })?;
        let query = Self::normalize_query(raw);
        if query.is_empty() {
            return Err(ToolError::InvalidArguments(
                "WebSearch requires a non-empty query".into(),
            ));
        }

        let results = generate_results(query, self.max_results);
        Ok(Self::format_results(query, &results))
    }
}

struct SearchResult {
    title: String,
    url: String,
    description: String,
}

/// Generate deterministic results based on query content.
fn generate_results(query: &str, count: usize) -> Vec<SearchResult> {
    let q = query.to_lowercase();

    let templates: Vec<(&str, Vec<SearchResult>)> = vec![
        (
            "rust",
            vec![
                SearchResult {
                    title: "The Rust Programming Language".into(),
                    url: "https://doc.rust-lang.org/book/".into(),
                    description: "Rust is a systems programming language focused on safety, speed, and concurrency.".into(),
                },
                SearchResult {
                    title: "crates.io: Rust Package Registry".into(),
                    url: "https://crates.io/".into(),
                    description: "The Rust community's crate registry for sharing and discovering libraries.".into(),
                },
            ],
        ),
        (
            "weather",
            vec![
                SearchResult {
                    title: "Weather Forecast - National Weather Service".into(),
                    url: "https://weather.gov/".into(),
                    description: "Current conditions and forecasts for locations across the United States.".into(),
                },
                SearchResult {
                    title: "OpenWeatherMap".into(),
                    url: "https://openweathermap.org/".into(),
                    description: "Free weather API providing current weather data and forecasts.".into(),
                },
            ],
        ),
    ];

    for (keyword, results) in templates {
        if q.contains(keyword) {
            return results.into_iter().take(count).collect();
        }
    }

    // Generic fallback.
    (0..count.min(3))
        .map(|i| SearchResult {
            title: format!("Result {} for: {}", i + 1, query),
            url: format!(
                "https://example.com/search?q={}&p={}",
                query.replace(' ', "+"),
                i + 1
            ),
            description: format!("A result relevant to the query '{query}'."),
        })
        .collect()
}
