//! Clock tool — reports the current date and time.
//!
//! Zero-argument: the model calls it as `Time()`.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use mnemo_core::error::ToolError;
use mnemo_core::tool::Tool;

pub struct ClockTool;

impl ClockTool {
    /// Render a timestamp as e.g. "The current time is 3:04pm on 02 January 2006".
    fn render(now: DateTime<Local>) -> String {
        // %l is space-padded; trim to drop the leading-zero hour.
        let clock = format!("{}", now.format("%l:%M%P"));
        format!(
            "The current time is {} on {}",
            clock.trim_start(),
            now.format("%d %B %Y")
        )
    }
}

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "Time"
    }

    fn description(&self) -> &str {
        "Prints the current date and time. Usage: return 'Time()'"
    }

    async fn run(&self, _argument: Option<&str>) -> std::result::Result<String, ToolError> {
        Ok(Self::render(Local::now()))
    }
}
