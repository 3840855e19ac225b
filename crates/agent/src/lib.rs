//! mnemo-agent — the per-turn control loop.
//!
//! Four components, wired together by [`Session`]:
//!
//! - [`context::ContextAssembler`] builds the layered prompt from identity,
//!   long-term summary, short-term history, and retrieved documents.
//! - [`resolver::parse_reply`] classifies raw model output as a direct
//!   answer or a `ToolName(arg)` invocation.
//! - [`memory::MemoryManager`] owns the bounded short-term buffer and the
//!   model-regenerated long-term summary.
//! - [`session::Session`] runs one turn at a time:
//!   assemble → complete → resolve → dispatch → record.

pub mod context;
pub mod memory;
pub mod resolver;
pub mod session;

pub use context::ContextAssembler;
pub use memory::{MemoryManager, MemoryPolicy, Turn};
pub use resolver::{parse_reply, ModelReply};
pub use session::Session;
